//! Ordered layer collection.

use log::debug;

use super::{Layer, LayerId, LayerKind};
use crate::error::LayerError;

/// Layers in draw order: index 0 is drawn first (bottom of the stack).
#[derive(Debug, Default)]
pub struct LayerList {
    layers: Vec<Layer>,
    /// Layers ever added, used for default names
    total: usize,
}

impl LayerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of layers ever added.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Default name for the next layer of `kind`, e.g. `"markers 3"`.
    pub fn next_name(&self, kind: LayerKind) -> String {
        format!("{} {}", kind.name(), self.total)
    }

    pub fn as_slice(&self) -> &[Layer] {
        &self.layers
    }

    /// Bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Layer> {
        self.layers.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id() == id)
    }

    pub fn by_id(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    pub fn by_id_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id() == id)
    }

    fn check_index(&self, index: usize) -> Result<(), LayerError> {
        if index < self.layers.len() {
            Ok(())
        } else {
            Err(LayerError::IndexOutOfRange {
                index,
                len: self.layers.len(),
            })
        }
    }

    /// Add on top. Returns the new layer's index.
    pub fn append(&mut self, layer: Layer) -> usize {
        debug!("Appending layer '{}'", layer.name());
        self.layers.push(layer);
        self.total += 1;
        self.layers.len() - 1
    }

    /// Insert before `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, layer: Layer) -> Result<(), LayerError> {
        if index > self.layers.len() {
            return Err(LayerError::IndexOutOfRange {
                index,
                len: self.layers.len(),
            });
        }
        debug!("Inserting layer '{}' at {}", layer.name(), index);
        self.layers.insert(index, layer);
        self.total += 1;
        Ok(())
    }

    /// Remove and return the layer at `index`, or the top layer.
    pub fn pop(&mut self, index: Option<usize>) -> Result<Layer, LayerError> {
        let index = match index {
            Some(index) => index,
            None => self.layers.len().checked_sub(1).ok_or(LayerError::IndexOutOfRange {
                index: 0,
                len: 0,
            })?,
        };
        self.check_index(index)?;
        Ok(self.layers.remove(index))
    }

    pub fn remove(&mut self, id: LayerId) -> Result<Layer, LayerError> {
        let index = self.index_of(id).ok_or(LayerError::NotFound(id))?;
        Ok(self.layers.remove(index))
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), LayerError> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.layers.swap(a, b);
        Ok(())
    }

    /// Rearrange so that position `i` holds the layer previously at
    /// `ordering[i]`. Every index must appear exactly once.
    pub fn reorder(&mut self, ordering: &[usize]) -> Result<(), LayerError> {
        let len = self.layers.len();
        let mut seen = vec![false; len];
        for &index in ordering {
            self.check_index(index)?;
            if std::mem::replace(&mut seen[index], true) {
                return Err(LayerError::DuplicateIndex(index));
            }
        }
        let missing: Vec<usize> = (0..len).filter(|&i| !seen[i]).collect();
        if !missing.is_empty() {
            return Err(LayerError::MissingIndices(missing));
        }

        let mut slots: Vec<Option<Layer>> = self.layers.drain(..).map(Some).collect();
        self.layers = ordering.iter().filter_map(|&i| slots[i].take()).collect();
        Ok(())
    }

    /// Drag-and-drop move of the layer at `index` to `insert`.
    ///
    /// If the dragged layer is selected, every selected layer moves with it,
    /// keeping their relative order. Otherwise only the dragged layer moves
    /// and becomes the sole selection. Returns true if the order changed.
    pub fn move_layers(&mut self, index: usize, insert: usize) -> Result<bool, LayerError> {
        self.check_index(index)?;
        let total = self.layers.len();
        if insert > total {
            return Err(LayerError::IndexOutOfRange { index: insert, len: total });
        }

        let dragged_selected = self.layers[index].is_selected();
        let moving: Vec<usize> = if dragged_selected {
            (0..total).filter(|&i| self.layers[i].is_selected()).collect()
        } else {
            vec![index]
        };

        let mut ordering: Vec<usize> = (0..total).filter(|i| !moving.contains(i)).collect();
        let offset = moving.iter().filter(|&&i| i < insert).count();
        let at = insert - offset;
        ordering.splice(at..at, moving.iter().copied());

        if !dragged_selected {
            self.unselect_all();
            self.layers[index].set_selected(true);
        }

        let changed = ordering.iter().enumerate().any(|(i, &o)| i != o);
        if changed {
            self.reorder(&ordering)?;
        }
        Ok(changed)
    }

    /// Returns true if any layer was deselected.
    pub fn unselect_all(&mut self) -> bool {
        self.layers
            .iter_mut()
            .fold(false, |changed, layer| layer.set_selected(false) || changed)
    }

    /// Remove every selected layer, returned bottom to top.
    pub fn remove_selected(&mut self) -> Vec<Layer> {
        let (removed, kept): (Vec<Layer>, Vec<Layer>) =
            self.layers.drain(..).partition(Layer::is_selected);
        self.layers = kept;
        removed
    }
}

impl<'a> IntoIterator for &'a LayerList {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
