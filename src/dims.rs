//! Dimension tracking: current index and extent of every data axis, plus one
//! slider per non-display axis.

use log::debug;
use ndview_ui::{slider, Slider};

use crate::constants::DISPLAY_AXES;
use crate::error::DimsError;

/// Intent emitted by a dimension slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimsMessage {
    /// The slider for `axis` moved to `index`
    IndexChanged { axis: usize, index: usize },
}

/// Per-axis slice position and extent.
///
/// Axes `0` and `1` are shown spatially and never get a control. Every other
/// axis with a non-zero extent owns a slider at row `axis - 2`.
#[derive(Debug)]
pub struct Dimensions {
    indices: Vec<usize>,
    max_lengths: Vec<usize>,
    controls: Vec<Option<Slider<DimsMessage>>>,
    need_redraw: bool,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new()
    }
}

impl Dimensions {
    /// Two display axes, no sliders.
    pub fn new() -> Self {
        Self {
            indices: vec![0; DISPLAY_AXES],
            max_lengths: vec![0; DISPLAY_AXES],
            controls: Vec::new(),
            need_redraw: false,
        }
    }

    pub fn ndim(&self) -> usize {
        self.indices.len()
    }

    /// Current index along every axis.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn max_lengths(&self) -> &[usize] {
        &self.max_lengths
    }

    /// Slider at `row`, if that axis has one.
    pub fn control(&self, row: usize) -> Option<&Slider<DimsMessage>> {
        self.controls.get(row).and_then(Option::as_ref)
    }

    pub fn control_mut(&mut self, row: usize) -> Option<&mut Slider<DimsMessage>> {
        self.controls.get_mut(row).and_then(Option::as_mut)
    }

    /// Existing sliders with the axis they drive.
    pub fn controls(&self) -> impl Iterator<Item = (usize, &Slider<DimsMessage>)> {
        self.controls
            .iter()
            .enumerate()
            .filter_map(|(row, control)| control.as_ref().map(|c| (row + DISPLAY_AXES, c)))
    }

    /// Resolve `axis` against the current number of dimensions.
    ///
    /// Negative values count from the end (`-1` is the last axis).
    pub fn resolve_axis(&self, axis: isize) -> Result<usize, DimsError> {
        let ndim = self.ndim();
        let resolved = if axis < 0 { ndim as isize + axis } else { axis };
        if resolved < 0 || resolved >= ndim as isize {
            return Err(DimsError::OutOfBounds { axis, ndim });
        }
        Ok(resolved as usize)
    }

    /// Slider row for `axis`.
    pub fn axis_to_row(&self, axis: isize) -> Result<usize, DimsError> {
        let axis = self.resolve_axis(axis)?;
        if axis < DISPLAY_AXES {
            return Err(DimsError::DisplayAxis { axis });
        }
        Ok(axis - DISPLAY_AXES)
    }

    /// Create, resize or remove the slider for `axis`.
    ///
    /// A `max_length` of zero removes the slider and returns `None`.
    pub fn update_control(
        &mut self,
        axis: isize,
        max_length: usize,
    ) -> Result<Option<&Slider<DimsMessage>>, DimsError> {
        let row = self.axis_to_row(axis)?;
        self.update_row(row, max_length);
        Ok(self.control(row))
    }

    fn update_row(&mut self, row: usize, max_length: usize) {
        let axis = row + DISPLAY_AXES;
        self.max_lengths[axis] = max_length;

        if max_length == 0 {
            if self.controls.get_mut(row).and_then(Option::take).is_some() {
                debug!("Removed slider for axis {}", axis);
            }
            return;
        }

        if self.controls.len() <= row {
            self.controls.resize_with(row + 1, || None);
        }
        let max = max_length - 1;
        let moved = match self.controls[row].as_mut() {
            Some(control) => control.set_maximum(max),
            None => {
                debug!("Created slider for axis {} (0..={})", axis, max);
                let index = self.indices[axis].min(max);
                self.controls[row] = Some(
                    slider(0, max)
                        .label(format!("axis {}", axis))
                        .value(index)
                        .on_change(move |index| DimsMessage::IndexChanged { axis, index }),
                );
                (index != self.indices[axis])
                    .then_some(DimsMessage::IndexChanged { axis, index })
            }
        };
        if let Some(message) = moved {
            self.apply(message);
        }
    }

    /// Apply a slider intent. Returns true when the index changed.
    pub fn apply(&mut self, message: DimsMessage) -> bool {
        let DimsMessage::IndexChanged { axis, index } = message;
        let Some(&max_length) = self.max_lengths.get(axis) else {
            return false;
        };
        let index = index.min(max_length.saturating_sub(1));
        if self.indices[axis] == index {
            return false;
        }
        self.indices[axis] = index;
        if axis >= DISPLAY_AXES {
            if let Some(control) = self.control_mut(axis - DISPLAY_AXES) {
                // Programmatic path: keep the slider in step without re-emitting
                let _ = control.set_value(index);
            }
        }
        self.need_redraw = true;
        debug!("Axis {} index -> {}", axis, index);
        true
    }

    /// Move the slider for `axis` to `index`, through the same path a user
    /// drag takes. Returns true when the index changed.
    pub fn set_index(&mut self, axis: isize, index: usize) -> Result<bool, DimsError> {
        let row = self.axis_to_row(axis)?;
        let message = self.control_mut(row).and_then(|c| c.set_value(index));
        Ok(message.is_some_and(|m| self.apply(m)))
    }

    /// Consume the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.need_redraw)
    }

    /// Recompute axes from the extents of all layers.
    ///
    /// `extents` holds one per-axis length list per layer. The result has at
    /// least two axes; indices are clamped into the new extents.
    pub fn on_layers_change<'a, I>(&mut self, extents: I)
    where
        I: IntoIterator<Item = &'a [usize]>,
    {
        let mut max_lengths = vec![0; DISPLAY_AXES];
        for extent in extents {
            if extent.len() > max_lengths.len() {
                max_lengths.resize(extent.len(), 0);
            }
            for (max, &len) in max_lengths.iter_mut().zip(extent) {
                *max = (*max).max(len);
            }
        }

        let ndim = max_lengths.len();
        if ndim != self.ndim() {
            debug!("Dimensions {} -> {}", self.ndim(), ndim);
        }
        self.indices.resize(ndim, 0);
        self.max_lengths.resize(ndim, 0);
        self.controls.truncate(ndim - DISPLAY_AXES);

        for (axis, &len) in max_lengths.iter().enumerate().take(DISPLAY_AXES) {
            self.max_lengths[axis] = len;
            self.indices[axis] = 0;
        }
        for (axis, &len) in max_lengths.iter().enumerate().skip(DISPLAY_AXES) {
            let before = self.indices[axis];
            self.update_row(axis - DISPLAY_AXES, len);
            if len == 0 {
                self.indices[axis] = 0;
            } else {
                self.indices[axis] = self.indices[axis].min(len - 1);
            }
            if self.indices[axis] != before {
                self.need_redraw = true;
            }
        }
    }
}
