use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;

use scrolltrigger::{Effect, NodeId};

/// Mutable state of one element in a [`MemoryDom`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementState {
    pub classes: BTreeSet<String>,
    pub min_height: Option<u32>,
    pub background_image: Option<String>,
    pub pinned: bool,
    pub removed: bool,
}

/// An in-memory effect target.
///
/// Applies [`Effect`]s to a map of element states, the way a real adapter
/// would apply them to a document. Useful for headless hosts and for testing
/// an effect stream end to end; elements are created lazily on first touch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryDom {
    elements: BTreeMap<NodeId, ElementState>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.classes.contains(class))
    }

    pub fn is_pinned(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| e.pinned)
    }

    pub fn is_removed(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| e.removed)
    }

    pub fn min_height(&self, id: NodeId) -> Option<u32> {
        self.element(id).and_then(|e| e.min_height)
    }

    pub fn background_image(&self, id: NodeId) -> Option<&str> {
        self.element(id).and_then(|e| e.background_image.as_deref())
    }

    /// Applies one effect. Idempotent: re-applying an effect that is already
    /// in force leaves the element unchanged.
    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::SetClass { target, class, on } => {
                let element = self.elements.entry(*target).or_default();
                if *on {
                    element.classes.insert(class.clone());
                } else {
                    element.classes.remove(class.as_str());
                }
            }
            Effect::Pin { target } => {
                self.elements.entry(*target).or_default().pinned = true;
            }
            Effect::Unpin { target } => {
                self.elements.entry(*target).or_default().pinned = false;
            }
            Effect::SetMinHeight { target, height } => {
                self.elements.entry(*target).or_default().min_height = Some(*height);
            }
            Effect::SetBackgroundImage { target, url } => {
                self.elements.entry(*target).or_default().background_image = Some(url.clone());
            }
            Effect::RemoveElement { target } => {
                self.elements.entry(*target).or_default().removed = true;
            }
        }
    }

    pub fn apply_all<'a>(&mut self, effects: impl IntoIterator<Item = &'a Effect>) {
        for effect in effects {
            self.apply(effect);
        }
    }
}
