//! Adding markers with the mouse.

use ndarray::{Array, IxDyn};
use ndview_render::Canvas;

use super::{viewer, volume, CountingCanvas};
use crate::message::{Key, Message};
use crate::viewer::Viewer;

/// Canvas pixel showing data point (row, col).
fn screen_of(v: &Viewer<CountingCanvas>, row: f32, col: f32) -> (f32, f32) {
    let canvas = v.canvas();
    canvas.camera().world_to_screen(col, row, canvas.size())
}

#[test]
fn test_press_adds_marker_when_annotating() {
    let mut v = viewer();
    v.add_image(Array::zeros(IxDyn(&[20, 20])), false).unwrap();
    v.new_markers().unwrap();
    v.set_annotation(true);

    let (x, y) = screen_of(&v, 7.0, 5.0);
    assert_eq!(v.on_mouse_press(x, y).unwrap(), Some(0));

    let markers = v.layers().get(1).unwrap().as_markers().unwrap();
    assert_eq!(markers.len(), 1);
    assert!((markers.coords()[[0, 0]] - 7.0).abs() < 1e-3);
    assert!((markers.coords()[[0, 1]] - 5.0).abs() < 1e-3);
    assert_eq!(v.status(), "[7, 5], markers 1, index 0");
}

#[test]
fn test_press_without_annotation_only_moves_cursor() {
    let mut v = viewer();
    v.add_image(Array::zeros(IxDyn(&[20, 20])), false).unwrap();
    v.new_markers().unwrap();

    let (x, y) = screen_of(&v, 3.0, 4.0);
    v.update(Message::MousePressed { x, y }).unwrap();
    assert!(v.layers().get(1).unwrap().as_markers().unwrap().is_empty());
    assert_eq!(v.status(), "[3, 4], image 0, value 0");
}

#[test]
fn test_marker_lands_in_current_slice() {
    let mut v = viewer();
    v.imshow(volume(10, 10, 6)).unwrap();
    v.set_index(2, 3).unwrap();
    v.new_markers().unwrap();
    v.set_annotation(true);

    let (x, y) = screen_of(&v, 2.0, 6.0);
    v.on_mouse_press(x, y).unwrap();

    let markers = v.layers().get(1).unwrap().as_markers().unwrap();
    assert_eq!(markers.coords()[[0, 2]], 3.0);
    assert_eq!(markers.in_slice(), &[0]);

    v.set_index(2, 4).unwrap();
    let markers = v.layers().get(1).unwrap().as_markers().unwrap();
    assert!(markers.in_slice().is_empty());
}

#[test]
fn test_camera_locked_while_annotating() {
    let mut v = viewer();
    v.add_image(Array::zeros(IxDyn(&[20, 20])), false).unwrap();
    v.set_annotation(true);

    let before = *v.canvas().camera();
    v.update(Message::MouseDragged { dx: 10.0, dy: 0.0 }).unwrap();
    v.update(Message::Scrolled { delta: 1.0, x: 50.0, y: 50.0 }).unwrap();
    assert_eq!(*v.canvas().camera(), before);

    // Holding space frees the camera
    v.update(Message::KeyPressed(Key::Space)).unwrap();
    v.update(Message::MouseDragged { dx: 10.0, dy: 0.0 }).unwrap();
    assert_eq!(v.canvas().camera().pan_x, before.pan_x + 10.0);

    v.update(Message::KeyPressed(Key::Home)).unwrap();
    assert_eq!(*v.canvas().camera(), before);
    assert_eq!(v.canvas().resets, 2);
}
