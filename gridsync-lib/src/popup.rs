//! The per-column filter-entry popup boundary.
//!
//! The popup is presentation-bound: it validates operand text and, on
//! confirmation, calls into [`Grid::add_filter`]. The grid itself knows
//! nothing about popups; this module is a one-directional client of the
//! controller.

use regex::Regex;

use crate::controller::Grid;
use crate::error::ConfigError;

/// One comparison operator as the presentation layer declares it: an
/// identifier, a display label, and the number of operands it takes.
///
/// The core never computes operand counts; it takes them from here as
/// declared facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMode {
    /// Identifier sent to the server.
    pub id: String,
    /// Human-readable label shown in the popup.
    pub label: String,
    /// Number of operand inputs this mode requires.
    pub operand_count: usize,
}

impl FilterMode {
    /// Declares a filter mode.
    pub fn new(id: impl Into<String>, label: impl Into<String>, operand_count: usize) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            operand_count,
        }
    }

    /// The standard mode set for text columns.
    pub fn text_modes() -> Vec<FilterMode> {
        vec![
            FilterMode::new("=", "equals", 1),
            FilterMode::new("!=", "does not equal", 1),
            FilterMode::new("contains", "contains", 1),
            FilterMode::new("startswith", "starts with", 1),
            FilterMode::new("between", "between", 2),
        ]
    }
}

/// Validation and submission logic for one column's filter popup.
///
/// Holds the declared modes, the currently selected mode, the operand inputs,
/// and an optional pattern every operand must match. Submission is gated by
/// [`check_requirements`](FilterPopup::check_requirements).
///
/// # Example
///
/// ```
/// use gridsync_lib::popup::{FilterMode, FilterPopup};
///
/// let mut popup = FilterPopup::new("price", FilterMode::text_modes())
///     .with_pattern(r"^\d+$")
///     .unwrap();
///
/// popup.set_input(0, "12a");
/// assert!(!popup.check_requirements());
///
/// popup.set_input(0, "12");
/// assert!(popup.check_requirements());
/// ```
#[derive(Debug)]
pub struct FilterPopup {
    column: String,
    modes: Vec<FilterMode>,
    pattern: Option<Regex>,
    selected: usize,
    inputs: Vec<String>,
    enabled: bool,
}

impl FilterPopup {
    /// Creates a popup for a column with the given modes. The first mode is
    /// selected initially.
    pub fn new(column: impl Into<String>, modes: Vec<FilterMode>) -> Self {
        let max_operands = modes.iter().map(|m| m.operand_count).max().unwrap_or(0);
        Self {
            column: column.into(),
            modes,
            pattern: None,
            selected: 0,
            inputs: vec![String::new(); max_operands],
            enabled: false,
        }
    }

    /// Requires every operand to match `pattern` (case-insensitive).
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(&format!("(?i){pattern}"))
            .map_err(|err| ConfigError::invalid_pattern(&self.column, err.to_string()))?;
        self.pattern = Some(regex);
        Ok(self)
    }

    /// Returns the column this popup filters.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Selects the mode with the given id. Returns `false` when unknown.
    pub fn select_mode(&mut self, id: &str) -> bool {
        match self.modes.iter().position(|m| m.id == id) {
            Some(index) => {
                self.selected = index;
                self.check_requirements();
                true
            }
            None => false,
        }
    }

    /// Returns the operand count of the selected mode.
    pub fn operand_count(&self) -> usize {
        self.modes.get(self.selected).map_or(0, |m| m.operand_count)
    }

    /// Sets the text of one operand input and re-validates.
    pub fn set_input(&mut self, index: usize, text: impl Into<String>) {
        if let Some(input) = self.inputs.get_mut(index) {
            *input = text.into();
        }
        self.check_requirements();
    }

    /// Returns whether submission is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Re-validates the inputs and returns whether submission is enabled.
    ///
    /// The loop runs once per declared operand but inspects the first input
    /// every iteration, so only the first operand ever gates submission and
    /// two-operand modes submit with a blank second operand. The add-filter
    /// boundary applies the same first-operand-only check.
    pub fn check_requirements(&mut self) -> bool {
        let mut valid = true;

        for _ in 0..self.operand_count() {
            let input = self.inputs.first().map(String::as_str).unwrap_or("");
            if input.is_empty() || self.pattern.as_ref().is_some_and(|p| !p.is_match(input)) {
                valid = false;
            }
        }

        self.enabled = valid;
        valid
    }

    /// Confirms the popup: adds the filter to the grid and resets the inputs.
    ///
    /// Returns the assigned slot, or `None` when validation has submission
    /// disabled. Triggers a full grid update on success.
    pub async fn submit(&mut self, grid: &mut Grid) -> Option<u32> {
        if !self.check_requirements() {
            return None;
        }

        let values: Vec<String> = self
            .inputs
            .iter()
            .take(self.operand_count())
            .cloned()
            .collect();
        let mode = self.modes.get(self.selected)?.id.clone();

        let slot = grid.add_filter(self.column.clone(), values, mode, true).await;

        for input in &mut self.inputs {
            input.clear();
        }
        self.enabled = false;
        slot
    }
}
