//! Z-order (layering) within a page.
//!
//! A page's asset list *is* its stacking order, so every action is a
//! reordering of that list. Untouched assets keep their relative order and
//! the set of ids never changes.

use crate::document::Page;
use crate::id::AssetId;

/// A layering command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerAction {
    /// Move to the top of the stack.
    Front,
    /// Move to the bottom of the stack.
    Back,
    /// Swap with the asset directly above.
    Forward,
    /// Swap with the asset directly below.
    Backward,
}

/// Reorder `items` by moving the element at `pos` according to `action`.
/// Returns true if the order changed.
fn reorder<T>(items: &mut Vec<T>, pos: usize, action: LayerAction) -> bool {
    let last = items.len() - 1;
    match action {
        LayerAction::Front => {
            if pos == last {
                return false;
            }
            let item = items.remove(pos);
            items.push(item);
        }
        LayerAction::Back => {
            if pos == 0 {
                return false;
            }
            let item = items.remove(pos);
            items.insert(0, item);
        }
        LayerAction::Forward => {
            if pos == last {
                return false; // already at front
            }
            items.swap(pos, pos + 1);
        }
        LayerAction::Backward => {
            if pos == 0 {
                return false; // already at back
            }
            items.swap(pos, pos - 1);
        }
    }
    true
}

impl Page {
    /// Apply a layering command to one asset. Unknown ids are a no-op.
    /// Returns true if the z-order changed.
    pub fn change_layer(&mut self, id: AssetId, action: LayerAction) -> bool {
        match self.index_of(id) {
            Some(pos) => reorder(&mut self.assets, pos, action),
            None => false,
        }
    }
}
