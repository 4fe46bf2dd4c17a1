//! Layer stack operations through the viewer.

use ndarray::{array, Array, IxDyn};

use super::{viewer, volume};
use crate::dims::DimsMessage;
use crate::error::{DimsError, LayerError, ViewerError};
use crate::layers::{LayerKind, StyleAttr, StyleError};
use crate::message::Message;

#[test]
fn test_first_layer_resets_view_once() {
    let mut v = viewer();
    v.add_image(Array::zeros(IxDyn(&[10, 20])), false).unwrap();
    assert_eq!(v.canvas().resets, 1);

    v.add_markers(array![[1.0, 1.0]]).unwrap();
    v.add_image(Array::zeros(IxDyn(&[5, 5])), false).unwrap();
    assert_eq!(v.canvas().resets, 1);
}

#[test]
fn test_new_layer_is_sole_selection() {
    let mut v = viewer();
    v.add_image(Array::zeros(IxDyn(&[4, 4])), false).unwrap();
    v.add_markers(array![[1.0, 1.0]]).unwrap();

    let selected: Vec<bool> = v.layers().iter().map(|l| l.is_selected()).collect();
    assert_eq!(selected, vec![false, true]);
    let names: Vec<&str> = v.layers().iter().map(|l| l.name()).collect();
    assert_eq!(names, vec!["image 0", "markers 1"]);
}

#[test]
fn test_dimension_sliders_follow_layers() {
    let mut v = viewer();
    let id = v.imshow(volume(4, 5, 6)).unwrap();

    assert_eq!(v.dims().ndim(), 3);
    assert_eq!(v.dims().max_lengths(), &[4, 5, 6]);
    assert_eq!(v.dims().control(0).map(|c| c.maximum()), Some(5));

    v.remove_layer(id).unwrap();
    assert_eq!(v.dims().ndim(), 2);
    assert!(v.dims().control(0).is_none());
}

#[test]
fn test_markers_far_outside_any_slice() {
    let mut v = viewer();
    v.add_markers(array![[1.0, 1.0, 1e30]]).unwrap();

    assert_eq!(v.dims().max_lengths()[2], i64::MAX as usize);
    assert!(v.active().active_markers.is_some());
    assert!(v.set_index(2, 3).unwrap());
}

#[test]
fn test_slicing_updates_status() {
    let mut v = viewer();
    v.imshow(volume(4, 5, 6)).unwrap();

    assert!(v.set_index(2, 4).unwrap());
    assert_eq!(v.status(), "[0, 0, 4], image 0, value 4");

    v.set_position([1.0, 2.0]);
    assert_eq!(v.status(), "[1, 2, 4], image 0, value 124");

    v.update(Message::Dims(DimsMessage::IndexChanged { axis: 2, index: 10 }))
        .unwrap();
    assert_eq!(v.dims().indices()[2], 5);
    assert_eq!(v.status(), "[1, 2, 5], image 0, value 125");
}

#[test]
fn test_set_index_errors() {
    let mut v = viewer();
    v.imshow(volume(4, 5, 6)).unwrap();

    assert!(v.set_index(-1, 1).unwrap());
    assert_eq!(v.dims().indices()[2], 1);
    assert!(matches!(
        v.set_index(1, 0),
        Err(ViewerError::Dims(DimsError::DisplayAxis { axis: 1 }))
    ));
    assert!(matches!(
        v.set_index(3, 0),
        Err(ViewerError::Dims(DimsError::OutOfBounds { axis: 3, ndim: 3 }))
    ));
}

#[test]
fn test_hiding_image_changes_active_elements() {
    let mut v = viewer();
    let image = v.add_image(Array::zeros(IxDyn(&[4, 4])), false).unwrap();
    v.add_markers(array![[1.0, 1.0]]).unwrap();
    assert_eq!(v.active().active_image, Some(0));

    v.update(Message::SetVisible { layer: image, visible: false })
        .unwrap();
    assert_eq!(v.active().active_image, None);
    assert_eq!(v.active().visible_markers, vec![1]);
}

#[test]
fn test_move_and_remove_selected() {
    let mut v = viewer();
    let a = v.add_image(Array::zeros(IxDyn(&[4, 4])), false).unwrap();
    let b = v.add_markers(array![[1.0, 1.0]]).unwrap();
    let c = v.add_markers(array![[2.0, 2.0]]).unwrap();

    // Drag the unselected bottom layer to the top
    v.update(Message::MoveLayer { index: 0, insert: 3 }).unwrap();
    let order: Vec<_> = v.layers().iter().map(|l| l.id()).collect();
    assert_eq!(order, vec![b, c, a]);
    assert_eq!(v.active().active_image, Some(2));
    assert!(v.active().visible_markers.is_empty());

    v.set_selected(b, true).unwrap();
    let removed = v.remove_selected();
    let removed: Vec<_> = removed.iter().map(|l| l.id()).collect();
    assert_eq!(removed, vec![b, a]);
    assert_eq!(v.layers().len(), 1);
    assert_eq!(v.active().active_markers, None);
}

#[test]
fn test_stack_errors() {
    let mut v = viewer();
    let id = v.add_image(Array::zeros(IxDyn(&[4, 4])), false).unwrap();
    v.remove_layer(id).unwrap();

    assert!(matches!(
        v.remove_layer(id),
        Err(ViewerError::Layer(LayerError::NotFound(missing))) if missing == id
    ));
    assert!(matches!(
        v.pop_layer(None),
        Err(ViewerError::Layer(LayerError::IndexOutOfRange { .. }))
    ));
}

#[test]
fn test_new_markers_match_dimensions() {
    let mut v = viewer();
    v.imshow(volume(4, 5, 6)).unwrap();
    v.update(Message::NewMarkers).unwrap();

    let layer = v.layers().get(1).unwrap();
    assert_eq!(layer.kind(), LayerKind::Markers);
    assert_eq!(layer.ndim(), 3);
    assert_eq!(v.active().active_markers, Some(1));
}

#[test]
fn test_style_messages() {
    let mut v = viewer();
    let data = Array::from_shape_fn(IxDyn(&[2, 2]), |ix| (ix[0] * 2 + ix[1]) as f32 * 10.0);
    let image = v.add_image(data, false).unwrap();

    v.update(Message::ClimChanged(0.25, 0.5)).unwrap();
    assert_eq!(v.status(), "(7.500, 15.000)");

    let err = v
        .update(Message::LayerStyle { layer: image, attr: StyleAttr::Size(3.0) })
        .unwrap_err();
    assert!(matches!(
        err,
        ViewerError::Style(StyleError::Unsupported { attr: "size", kind: LayerKind::Image })
    ));

    v.set_style(image, &StyleAttr::Clim(3.0, 27.0)).unwrap();
    assert_eq!(v.status(), "(3.000, 27.000)");
}

#[test]
fn test_markers_use_configured_defaults() {
    let defaults = crate::config::LayerDefaults {
        marker_size: 4.0,
        marker_face_color: "yellow".to_string(),
        ..Default::default()
    };
    let mut v = viewer().with_defaults(defaults);
    v.add_markers(array![[1.0, 1.0]]).unwrap();

    let markers = v.layers().get(0).unwrap().as_markers().unwrap();
    assert_eq!(markers.size(), 4.0);
    assert_eq!(markers.face_color(), "yellow");
}
