//! Grid state: page, sorting, and active filters.

mod filter;
mod sorting;

pub use filter::FilterEntry;
pub use filter::FilterSpec;
pub use sorting::Direction;
pub use sorting::Sorting;

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// A serializable snapshot of grid state, used to seed a grid from a saved
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// The page to restore, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// The sorting to restore, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting: Option<Sorting>,
    /// The filter entries to restore, carrying their original slots.
    #[serde(default)]
    pub filter: Vec<FilterEntry>,
}

/// The parameters a grid will send on its next request.
///
/// Pure data with mutation operations; no I/O. Exclusively owned and mutated
/// by the grid controller.
///
/// `page: None` means "default page" -- the server decides, typically page 1.
/// `sorting: None` means default order. Filters are keyed by slot number;
/// slots are assigned monotonically and are not reused within a session, even
/// after removal, except that [`clear_filters`] resets the counter to zero.
///
/// [`clear_filters`]: GridState::clear_filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    page: Option<u64>,
    sorting: Option<Sorting>,
    filters: BTreeMap<u32, FilterEntry>,
    next_slot: u32,
}

impl GridState {
    /// Creates an empty state: default page, default order, no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores page, sorting, and filter entries from a snapshot.
    ///
    /// Seeded entries keep their recorded slots. The slot counter is left
    /// untouched, so a later [`add_filter`] scans from wherever the counter
    /// already is.
    ///
    /// [`add_filter`]: GridState::add_filter
    pub fn seed(&mut self, snapshot: StateSnapshot) {
        if let Some(page) = snapshot.page {
            self.page = Some(page);
        }
        if let Some(sorting) = snapshot.sorting {
            self.sorting = Some(sorting);
        }
        for entry in snapshot.filter {
            self.filters.insert(entry.slot, entry);
        }
    }

    /// Returns the current page, if one is set.
    pub fn page(&self) -> Option<u64> {
        self.page
    }

    /// Returns the current sorting, if one is set.
    pub fn sorting(&self) -> Option<&Sorting> {
        self.sorting.as_ref()
    }

    /// Returns the active filter entries, keyed by slot.
    pub fn filters(&self) -> &BTreeMap<u32, FilterEntry> {
        &self.filters
    }

    /// Returns the number of active filter entries.
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Sets the page to request next. Does not trigger a reload.
    pub fn set_page(&mut self, page: u64) {
        self.page = Some(page);
    }

    /// Clears the page back to the server default.
    pub fn clear_page(&mut self) {
        self.page = None;
    }

    /// Replaces the sort specification wholesale.
    pub fn set_sorting(&mut self, column: impl Into<String>, direction: Direction) {
        self.sorting = Some(Sorting::new(column, direction));
    }

    /// Adds a filter entry and returns its assigned slot.
    ///
    /// Returns `None` without touching the state when the first value is
    /// missing or empty. Only the first operand is checked.
    ///
    /// The slot scan starts at the running counter rather than at zero, so a
    /// slot freed by [`remove_filter`] below the counter is never refilled.
    /// The counter ends one past the chosen slot.
    ///
    /// [`remove_filter`]: GridState::remove_filter
    pub fn add_filter(
        &mut self,
        column: impl Into<String>,
        values: Vec<String>,
        mode: impl Into<String>,
    ) -> Option<u32> {
        if values.first().is_none_or(|v| v.is_empty()) {
            return None;
        }

        let mut slot = self.next_slot;
        while self.filters.contains_key(&slot) {
            slot += 1;
        }
        self.next_slot = slot + 1;

        self.filters.insert(
            slot,
            FilterEntry {
                slot,
                column: column.into(),
                values,
                mode: mode.into(),
            },
        );
        Some(slot)
    }

    /// Removes the filter entry in the given slot, if present.
    pub fn remove_filter(&mut self, slot: u32) {
        self.filters.remove(&slot);
    }

    /// Removes all filter entries and resets the slot counter to zero.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.next_slot = 0;
    }

    /// Clears page, sorting, and filters back to the defaults.
    pub fn reset(&mut self) {
        self.page = None;
        self.sorting = None;
        self.clear_filters();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_add_filter_assigns_sequential_slots() {
        let mut state = GridState::new();
        assert_eq!(state.add_filter("a", values(&["1"]), "="), Some(0));
        assert_eq!(state.add_filter("b", values(&["2"]), "="), Some(1));
        assert_eq!(state.add_filter("c", values(&["3"]), "="), Some(2));
        assert_eq!(state.filter_count(), 3);
    }

    #[test]
    fn test_add_filter_rejects_empty_first_value() {
        let mut state = GridState::new();
        assert_eq!(state.add_filter("a", values(&["", "x"]), "between"), None);
        assert_eq!(state.add_filter("a", Vec::new(), "="), None);
        assert_eq!(state.filter_count(), 0);

        // Only the first operand is checked.
        assert_eq!(state.add_filter("a", values(&["x", ""]), "between"), Some(0));
    }

    #[test]
    fn test_removed_slots_below_counter_are_not_reused() {
        let mut state = GridState::new();
        state.add_filter("a", values(&["1"]), "=");
        state.add_filter("b", values(&["2"]), "=");
        state.add_filter("c", values(&["3"]), "=");

        state.remove_filter(1);
        // The scan starts at the counter (3), not at the freed slot.
        assert_eq!(state.add_filter("d", values(&["4"]), "="), Some(3));
        assert!(!state.filters().contains_key(&1));
    }

    #[test]
    fn test_slots_are_unique_across_mixed_operations() {
        let mut state = GridState::new();
        let a = state.add_filter("a", values(&["1"]), "=").unwrap();
        let b = state.add_filter("b", values(&["2"]), "=").unwrap();
        state.remove_filter(a);
        let c = state.add_filter("c", values(&["3"]), "=").unwrap();

        assert_ne!(b, c);
        let slots: Vec<u32> = state.filters().keys().copied().collect();
        assert_eq!(slots, vec![b, c]);
        for (slot, entry) in state.filters() {
            assert_eq!(*slot, entry.slot);
        }
    }

    #[test]
    fn test_clear_filters_resets_counter() {
        let mut state = GridState::new();
        state.add_filter("a", values(&["1"]), "=");
        state.add_filter("b", values(&["2"]), "=");

        state.clear_filters();
        assert_eq!(state.filter_count(), 0);
        assert_eq!(state.add_filter("c", values(&["3"]), "="), Some(0));
    }

    #[test]
    fn test_seed_keeps_slots_and_counter() {
        let mut state = GridState::new();
        state.seed(StateSnapshot {
            page: Some(3),
            sorting: Some(Sorting::new("x", Direction::Desc)),
            filter: vec![FilterEntry {
                slot: 0,
                column: "name".to_string(),
                values: values(&["abc"]),
                mode: "contains".to_string(),
            }],
        });

        assert_eq!(state.page(), Some(3));
        assert_eq!(state.sorting().unwrap().column, "x");
        assert_eq!(state.filter_count(), 1);

        // The counter was not advanced by seeding; the scan walks past the
        // occupied slot 0 and lands on 1.
        assert_eq!(state.add_filter("b", values(&["2"]), "="), Some(1));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = GridState::new();
        state.set_page(5);
        state.set_sorting("x", Direction::Asc);
        state.add_filter("a", values(&["1"]), "=");

        state.reset();
        assert_eq!(state, GridState::new());
        assert_eq!(state.add_filter("a", values(&["1"]), "="), Some(0));
    }

    #[test]
    fn test_remove_absent_slot_is_a_no_op() {
        let mut state = GridState::new();
        state.remove_filter(7);
        assert_eq!(state.filter_count(), 0);
    }
}
