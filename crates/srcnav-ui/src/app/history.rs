//! Back/forward navigation history.

use std::path::PathBuf;

use egui::Vec2;

use crate::view::HistoryAvailability;

/// Oldest entries are dropped past this many.
const MAX_ENTRIES: usize = 100;

/// A place the user has been: a file and the viewport origin shown in it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub path: PathBuf,
    pub origin: Vec2,
}

impl HistoryEntry {
    pub fn new(path: impl Into<PathBuf>, origin: Vec2) -> Self {
        Self {
            path: path.into(),
            origin,
        }
    }
}

/// Two stacks around the current location.
#[derive(Debug, Default)]
pub struct NavigationHistory {
    back: Vec<HistoryEntry>,
    forward: Vec<HistoryEntry>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `current` before navigating away from it. Forward history is
    /// discarded.
    pub fn push(&mut self, current: HistoryEntry) {
        self.forward.clear();
        self.back.push(current);
        if self.back.len() > MAX_ENTRIES {
            self.back.remove(0);
        }
    }

    /// Steps back, remembering `current` for [`go_forward`](Self::go_forward).
    pub fn go_back(&mut self, current: HistoryEntry) -> Option<HistoryEntry> {
        let entry = self.back.pop()?;
        self.forward.push(current);
        Some(entry)
    }

    /// Steps forward, remembering `current` for [`go_back`](Self::go_back).
    pub fn go_forward(&mut self, current: HistoryEntry) -> Option<HistoryEntry> {
        let entry = self.forward.pop()?;
        self.back.push(current);
        Some(entry)
    }

    /// The entry [`go_back`](Self::go_back) would return.
    pub fn peek_back(&self) -> Option<&HistoryEntry> {
        self.back.last()
    }

    pub fn peek_forward(&self) -> Option<&HistoryEntry> {
        self.forward.last()
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn availability(&self) -> HistoryAvailability {
        HistoryAvailability {
            back: self.can_go_back(),
            forward: self.can_go_forward(),
        }
    }

    pub fn clear(&mut self) {
        self.back.clear();
        self.forward.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, y: f32) -> HistoryEntry {
        HistoryEntry::new(name, Vec2::new(0.0, y))
    }

    #[test]
    fn new_history_is_empty() {
        let history = NavigationHistory::new();
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
        assert_eq!(history.availability(), HistoryAvailability::default());
    }

    #[test]
    fn back_then_forward_returns_to_start() {
        let mut history = NavigationHistory::new();
        history.push(entry("a.c", 0.0));
        history.push(entry("b.c", 40.0));

        let back = history.go_back(entry("c.c", 80.0)).unwrap();
        assert_eq!(back, entry("b.c", 40.0));
        assert!(history.can_go_forward());

        let back = history.go_back(back).unwrap();
        assert_eq!(back, entry("a.c", 0.0));
        assert!(!history.can_go_back());
        assert_eq!(history.go_back(back.clone()), None);

        let fwd = history.go_forward(back).unwrap();
        assert_eq!(fwd, entry("b.c", 40.0));
        let fwd = history.go_forward(fwd).unwrap();
        assert_eq!(fwd, entry("c.c", 80.0));
        assert!(!history.can_go_forward());
    }

    #[test]
    fn peeking_does_not_move() {
        let mut history = NavigationHistory::new();
        assert_eq!(history.peek_back(), None);
        history.push(entry("a.c", 0.0));
        assert_eq!(history.peek_back(), Some(&entry("a.c", 0.0)));
        assert_eq!(history.peek_back(), Some(&entry("a.c", 0.0)));
        assert!(!history.can_go_forward());

        history.go_back(entry("b.c", 10.0));
        assert_eq!(history.peek_back(), None);
        assert_eq!(history.peek_forward(), Some(&entry("b.c", 10.0)));
        assert!(history.can_go_forward());
    }

    #[test]
    fn push_discards_forward_entries() {
        let mut history = NavigationHistory::new();
        history.push(entry("a.c", 0.0));
        history.go_back(entry("b.c", 0.0));
        assert!(history.can_go_forward());

        history.push(entry("a.c", 10.0));
        assert!(!history.can_go_forward());
        assert_eq!(
            history.availability(),
            HistoryAvailability {
                back: true,
                forward: false
            }
        );
    }

    #[test]
    fn history_is_bounded() {
        let mut history = NavigationHistory::new();
        for i in 0..MAX_ENTRIES + 20 {
            history.push(entry("a.c", i as f32));
        }
        let mut current = entry("z.c", 0.0);
        let mut steps = 0;
        while let Some(prev) = history.go_back(current.clone()) {
            current = prev;
            steps += 1;
        }
        assert_eq!(steps, MAX_ENTRIES);
        assert_eq!(current, entry("a.c", 20.0));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut history = NavigationHistory::new();
        history.push(entry("a.c", 0.0));
        history.go_back(entry("b.c", 0.0));
        history.clear();
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }
}
