/// Per-line state for the active lyric line.
///
/// Holds a single value keyed by lyric id. Asking for a different id replaces the value and
/// bumps the generation, so memory stays bounded however many lines pass through.
#[derive(Clone, Debug)]
pub struct LineSlot<T> {
    key: Option<String>,
    generation: u64,
    value: Option<T>,
}

impl<T> Default for LineSlot<T> {
    fn default() -> Self {
        Self {
            key: None,
            generation: 0,
            value: None,
        }
    }
}

impl<T> LineSlot<T> {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// State for `lyric_id`, built with `init` if absent or owned by another line.
    pub fn get_or_insert_with(&mut self, lyric_id: &str, init: impl FnOnce() -> T) -> &mut T {
        if self.key.as_deref() != Some(lyric_id) || self.value.is_none() {
            self.generation += 1;
            self.key = Some(lyric_id.to_owned());
            self.value = None;
        }
        self.value.get_or_insert_with(init)
    }

    /// State for `lyric_id`, if it is the current line.
    pub fn get(&self, lyric_id: &str) -> Option<&T> {
        if self.key.as_deref() == Some(lyric_id) {
            self.value.as_ref()
        } else {
            None
        }
    }

    /// Mutable state for `lyric_id`, if it is the current line.
    pub fn get_mut(&mut self, lyric_id: &str) -> Option<&mut T> {
        if self.key.as_deref() == Some(lyric_id) {
            self.value.as_mut()
        } else {
            None
        }
    }

    /// Current line id.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Take the current state out, leaving the slot empty.
    pub fn take(&mut self) -> Option<(String, T)> {
        let key = self.key.take()?;
        self.value.take().map(|v| (key, v))
    }

    /// Number of times the slot was (re)built.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether no state is held.
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Drop the state.
    pub fn clear(&mut self) {
        self.key = None;
        self.value = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/slot.rs"]
mod tests;
