use alloc::string::String;

use crate::key::{InputKey, InputMap};

/// Cached per-input metrics.
///
/// Every field starts unknown; handlers fill them in as events arrive. Missing values are never
/// an error: the engine falls back to "caret at end" or skips the scroll.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputInfo {
    pub text: Option<String>,
    /// Caret offset, in `char`s.
    pub selection_end: Option<usize>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Set on focus; cleared once a scroll for this input has been issued.
    pub focus_pending_scroll: bool,
}

impl InputInfo {
    /// Sets `text` only when it is still unknown.
    pub fn init_text(&mut self, text: Option<&str>) {
        if self.text.is_none() {
            self.text = text.map(String::from);
        }
    }

    /// Returns the text before the caret when the caret sits strictly inside the text.
    ///
    /// `None` means "caret at end" (or unknown), where no measurement is needed.
    pub fn text_before_caret(&self) -> Option<&str> {
        let text = self.text.as_deref()?;
        let end = self.selection_end?;
        let (byte_end, _) = text.char_indices().nth(end)?;
        Some(&text[..byte_end])
    }
}

/// Maps input identities to their [`InputInfo`].
///
/// Owned by one engine (one container); dropped with it. There is deliberately no per-entry
/// removal: an entry may outlive its input until the container goes away.
#[derive(Clone, Debug)]
pub struct InputRegistry<K> {
    inputs: InputMap<K, InputInfo>,
}

impl<K: InputKey> Default for InputRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: InputKey> InputRegistry<K> {
    pub fn new() -> Self {
        Self {
            inputs: InputMap::new(),
        }
    }

    /// Returns the entry for `id`, creating an empty one on first reference.
    pub fn get_or_create(&mut self, id: K) -> &mut InputInfo {
        self.inputs.entry(id).or_default()
    }

    pub fn get(&self, id: &K) -> Option<&InputInfo> {
        self.inputs.get(id)
    }

    pub fn get_mut(&mut self, id: &K) -> Option<&mut InputInfo> {
        self.inputs.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Drops every entry. Only used when the owning container is torn down.
    pub fn clear(&mut self) {
        self.inputs.clear();
    }
}
