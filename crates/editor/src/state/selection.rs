use shared::{Block, BlockIndex};

/// Pointer modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
    };
}

/// Which policy a plain (non-shift) block click follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickPolicy {
    /// Whole scene of the clicked block
    #[default]
    SceneGroup,
    /// Only the clicked block (keeps an existing multi-selection that contains it)
    SingleBlock,
    /// Clicked block and every block with a higher index
    IndexSuffix,
}

/// Block selection state (ordered by insertion)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    selected: Vec<BlockIndex>,
}

impl SelectionState {
    /// All selected indices, in order of selection
    pub fn all(&self) -> &[BlockIndex] {
        &self.selected
    }

    /// First selected index
    pub fn primary(&self) -> Option<BlockIndex> {
        self.selected.first().copied()
    }

    /// Smallest selected index
    pub fn min_index(&self) -> Option<BlockIndex> {
        self.selected.iter().copied().min()
    }

    pub fn is_selected(&self, index: BlockIndex) -> bool {
        self.selected.contains(&index)
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Select a single block (clears previous selection)
    pub fn select(&mut self, index: BlockIndex) {
        self.selected.clear();
        self.selected.push(index);
    }

    /// Add without toggling; no-op if already selected
    pub fn add(&mut self, index: BlockIndex) -> bool {
        if self.is_selected(index) {
            return false;
        }
        self.selected.push(index);
        true
    }

    pub fn remove(&mut self, index: BlockIndex) -> bool {
        let before = self.selected.len();
        self.selected.retain(|&i| i != index);
        self.selected.len() != before
    }

    /// Checkbox-driven add/remove, independent of the click policy
    pub fn set_checked(&mut self, index: BlockIndex, checked: bool) -> bool {
        if checked {
            self.add(index)
        } else {
            self.remove(index)
        }
    }

    /// Replace the selection with `indices`, dropping duplicates
    pub fn set_all(&mut self, indices: impl IntoIterator<Item = BlockIndex>) {
        self.selected.clear();
        for index in indices {
            self.add(index);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Apply a block click. Returns true when the selection changed.
    pub fn click(
        &mut self,
        index: BlockIndex,
        modifiers: Modifiers,
        policy: ClickPolicy,
        blocks: &[Block],
    ) -> bool {
        let before = self.selected.clone();

        if modifiers.shift {
            self.add(index);
        } else {
            match policy {
                ClickPolicy::SingleBlock => {
                    let keeps_group = self.selected.len() > 1 && self.is_selected(index);
                    if !keeps_group {
                        self.select(index);
                    }
                }
                ClickPolicy::IndexSuffix => {
                    let mut suffix: Vec<BlockIndex> = blocks
                        .iter()
                        .map(|b| b.index)
                        .filter(|&i| i >= index)
                        .collect();
                    suffix.sort_unstable();
                    self.set_all(suffix);
                }
                ClickPolicy::SceneGroup => {
                    let key = blocks
                        .iter()
                        .find(|b| b.index == index)
                        .and_then(|b| b.scene_key());
                    match key {
                        Some(key) => self.set_all(
                            blocks
                                .iter()
                                .filter(|b| b.scene_key() == Some(key))
                                .map(|b| b.index),
                        ),
                        None => self.select(index),
                    }
                }
            }
        }

        tracing::debug!(index, ?policy, shift = modifiers.shift, selected = ?self.selected, "block click");
        self.selected != before
    }
}
