//! Property setters and their notifications.

use ndarray::{array, Array, IxDyn};

use super::{record, viewer};
use crate::constants::ANNOTATION_HELP;
use crate::events::{LayerListChange, SliderUpdate};
use crate::message::{Key, Message};

#[test]
fn test_status_emits_only_on_change() {
    let mut v = viewer();
    let log = record(&mut v.events_mut().status);

    v.set_status("Ready");
    assert!(log.borrow().is_empty());

    v.set_status("[1, 2], image 0, value 3");
    v.set_status("[1, 2], image 0, value 3");
    assert_eq!(*log.borrow(), vec!["[1, 2], image 0, value 3".to_string()]);
    assert_eq!(v.status(), "[1, 2], image 0, value 3");
}

#[test]
fn test_annotation_sets_help() {
    let mut v = viewer();
    let annotation = record(&mut v.events_mut().annotation);
    let help = record(&mut v.events_mut().help);

    v.set_annotation(true);
    v.set_annotation(true);
    assert!(v.annotation());
    assert_eq!(v.help(), ANNOTATION_HELP);

    v.set_annotation(false);
    assert_eq!(*annotation.borrow(), vec![true, false]);
    assert_eq!(*help.borrow(), vec![ANNOTATION_HELP.to_string(), String::new()]);
}

#[test]
fn test_active_markers_notifications() {
    let mut v = viewer();
    let log = record(&mut v.events_mut().active_markers);

    v.add_image(Array::zeros(IxDyn(&[8, 8])), false).unwrap();
    assert!(log.borrow().is_empty());

    let markers = v.add_markers(array![[1.0, 1.0]]).unwrap();
    assert_eq!(v.active().active_markers, Some(1));

    v.set_selected(markers, false).unwrap();
    assert_eq!(*log.borrow(), vec![Some(1), None]);
}

#[test]
fn test_space_suspends_annotation() {
    let mut v = viewer();
    v.update(Message::KeyPressed(Key::Space)).unwrap();
    v.update(Message::KeyReleased(Key::Space)).unwrap();
    assert!(!v.annotation());

    v.set_annotation(true);
    let log = record(&mut v.events_mut().annotation);
    v.update(Message::KeyPressed(Key::Space)).unwrap();
    // Key repeat while held
    v.update(Message::KeyPressed(Key::Space)).unwrap();
    assert!(!v.annotation());
    assert_eq!(v.help(), "");

    v.update(Message::KeyReleased(Key::Space)).unwrap();
    assert!(v.annotation());
    assert_eq!(*log.borrow(), vec![false, true]);
}

#[test]
fn test_layer_and_slider_events() {
    let mut v = viewer();
    let layers = record(&mut v.events_mut().layers);
    let slider = record(&mut v.events_mut().update_slider);

    let data = Array::from_shape_fn(IxDyn(&[2, 2]), |ix| (ix[0] * 2 + ix[1]) as f32 * 10.0);
    let id = v.add_image(data, false).unwrap();
    assert_eq!(v.status(), "(0.000, 30.000)");
    assert_eq!(
        slider.borrow().last(),
        Some(&SliderUpdate { values: Some((0.0, 1.0)), enabled: true })
    );

    v.remove_layer(id).unwrap();
    assert_eq!(
        *layers.borrow(),
        vec![LayerListChange::Added { id, index: 0 }, LayerListChange::Removed { id }]
    );
    assert_eq!(
        slider.borrow().last(),
        Some(&SliderUpdate { values: None, enabled: false })
    );
    assert_eq!(v.status(), "Ready");
}
