//! In-process navigation history with push/replace/back semantics.

use crate::nav::route::Route;

/// Navigation state attached to one history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    /// Route the user was trying to reach before a redirect.
    pub from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub route: Route,
    pub state: NavState,
}

/// Linear history stack; pushing drops any forward entries.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl History {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![HistoryEntry {
                route: initial,
                state: NavState::default(),
            }],
            index: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    /// Position of the current entry.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn push(&mut self, route: Route, state: NavState) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry { route, state });
        self.index = self.entries.len() - 1;
    }

    /// Rewrites the current entry in place; history length is unchanged.
    pub fn replace(&mut self, route: Route) {
        self.entries[self.index].route = route;
    }

    /// Moves one entry back; returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::{History, NavState};
    use crate::nav::route::Route;

    #[test]
    fn push_truncates_forward_entries() {
        let mut history = History::new(Route::Intake);
        history.push(Route::Browse { success: false }, NavState::default());
        assert!(history.back());
        history.push(Route::browse_after_submit(), NavState::default());

        assert_eq!(history.len(), 2);
        assert_eq!(history.current().route, Route::browse_after_submit());
    }

    #[test]
    fn replace_keeps_length() {
        let mut history = History::new(Route::Intake);
        history.push(Route::browse_after_submit(), NavState::default());
        history.replace(Route::Browse { success: false });

        assert_eq!(history.len(), 2);
        assert_eq!(history.current().route, Route::Browse { success: false });
        assert!(history.back());
        assert!(!history.back());
    }
}
