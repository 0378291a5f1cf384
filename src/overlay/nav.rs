/// Highlight state over the displayed list.
///
/// `active` is `None` exactly when the list is empty; otherwise it always
/// indexes the current list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigation {
    len: usize,
    active: Option<usize>,
}

impl Navigation {
    /// State for a freshly replaced list of `len` items.
    pub fn reset(len: usize) -> Self {
        Navigation {
            len,
            active: if len > 0 { Some(0) } else { None },
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move down, wrapping from the last item to the first.
    pub fn advance_down(&mut self) {
        if let Some(i) = self.active {
            self.active = Some((i + 1) % self.len);
        }
    }

    /// Move up, wrapping from the first item to the last.
    pub fn advance_up(&mut self) {
        if let Some(i) = self.active {
            self.active = Some(if i > 0 { i - 1 } else { self.len - 1 });
        }
    }

    /// Point at a specific item (mouse hover). Out-of-range indexes are ignored.
    pub fn hover(&mut self, index: usize) {
        if index < self.len {
            self.active = Some(index);
        }
    }
}

/// The window of list rows the panel shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
}

impl Viewport {
    /// Scroll just enough to keep `active` inside a window of `height` rows.
    pub fn follow(&mut self, active: Option<usize>, height: usize) {
        let Some(active) = active else {
            self.offset = 0;
            return;
        };
        if height == 0 {
            return;
        }
        if active < self.offset {
            self.offset = active;
        } else if active >= self.offset + height {
            self.offset = active + 1 - height;
        }
    }

    /// Scroll by `delta` rows, clamped so the window stays filled.
    pub fn scroll(&mut self, delta: i32, len: usize, height: usize) {
        let max = len.saturating_sub(height);
        let next = self.offset as i64 + delta as i64;
        self.offset = next.clamp(0, max as i64) as usize;
    }
}
