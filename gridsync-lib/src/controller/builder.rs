//! Typestate builder for [`Grid`].

use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

use crate::error::ConfigError;
use crate::fetch::Fetcher;
use crate::fetch::HttpFetcher;
use crate::hooks::UpdateHookRegistry;
use crate::request::RequestParams;
use crate::state::FilterSpec;
use crate::state::GridState;
use crate::state::StateSnapshot;
use crate::surface::GridSurface;
use crate::surface::ViewBuffer;

use super::ErrorHandler;
use super::Grid;
use super::Phase;

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`Grid`].
///
/// Uses the typestate pattern so the required fields are enforced at compile
/// time.
///
/// # Required Fields
///
/// - `id` - identifies the grid (registry key, log tag)
/// - `url` - the endpoint serving the grid's view fragments
///
/// # Example
///
/// ```
/// use gridsync_lib::Grid;
///
/// let grid = Grid::builder()
///     .id("orders")
///     .url("https://example.com/orders/grid")
///     .build()
///     .unwrap();
/// assert_eq!(grid.id(), "orders");
/// ```
pub struct GridBuilder<Id, Url> {
    id: Id,
    url: Url,
    fetcher: Option<Arc<dyn Fetcher>>,
    surface: Option<Box<dyn GridSurface>>,
    error_handler: Option<ErrorHandler>,
    extra_view_params: Map<String, Value>,
    initial_state: Option<StateSnapshot>,
    extra_filters: Vec<FilterSpec>,
}

impl GridBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            id: Missing,
            url: Missing,
            fetcher: None,
            surface: None,
            error_handler: None,
            extra_view_params: Map::new(),
            initial_state: None,
            extra_filters: Vec::new(),
        }
    }
}

impl Default for GridBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> GridBuilder<Missing, U> {
    /// Sets the grid id.
    pub fn id(self, id: impl Into<String>) -> GridBuilder<Set<String>, U> {
        GridBuilder {
            id: Set(id.into()),
            url: self.url,
            fetcher: self.fetcher,
            surface: self.surface,
            error_handler: self.error_handler,
            extra_view_params: self.extra_view_params,
            initial_state: self.initial_state,
            extra_filters: self.extra_filters,
        }
    }
}

impl<I> GridBuilder<I, Missing> {
    /// Sets the endpoint URL the grid reloads from.
    pub fn url(self, url: impl Into<String>) -> GridBuilder<I, Set<String>> {
        GridBuilder {
            id: self.id,
            url: Set(url.into()),
            fetcher: self.fetcher,
            surface: self.surface,
            error_handler: self.error_handler,
            extra_view_params: self.extra_view_params,
            initial_state: self.initial_state,
            extra_filters: self.extra_filters,
        }
    }
}

impl<I, U> GridBuilder<I, U> {
    /// Sets the fetcher. Defaults to [`HttpFetcher`].
    pub fn fetcher<F: Fetcher + 'static>(mut self, fetcher: F) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Sets the surface updates are applied to. Defaults to a fresh
    /// [`ViewBuffer`]; pass a clone of your own buffer to observe the view.
    pub fn surface<S: GridSurface + 'static>(mut self, surface: S) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Sets the error handler notified on fetch failures.
    pub fn error_handler(
        mut self,
        handler: impl Fn(&str, &RequestParams) + Send + 'static,
    ) -> Self {
        self.error_handler = Some(Box::new(handler));
        self
    }

    /// Adds one extra key/value pair sent with every request.
    ///
    /// Extra parameters are overlaid onto the built request last and
    /// overwrite colliding keys.
    pub fn extra_view_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra_view_params.insert(key.into(), value);
        self
    }

    /// Seeds page, sorting, and filters from a saved snapshot.
    pub fn initial_state(mut self, snapshot: StateSnapshot) -> Self {
        self.initial_state = Some(snapshot);
        self
    }

    /// Adds a preset filter.
    ///
    /// When any preset filters are given, they replace every filter from the
    /// initial-state snapshot; slots are reassigned starting at zero.
    pub fn extra_filter(mut self, filter: FilterSpec) -> Self {
        self.extra_filters.push(filter);
        self
    }
}

impl GridBuilder<Set<String>, Set<String>> {
    /// Builds the [`Grid`].
    ///
    /// Only available once both `id` and `url` have been set. Fails when the
    /// URL does not parse. The grid starts in the `Idle` phase; issue the
    /// initial load with [`Grid::update`] or mount it through a
    /// [`GridRegistry`](crate::registry::GridRegistry).
    pub fn build(self) -> Result<Grid, ConfigError> {
        let url = self.url.0;
        url::Url::parse(&url).map_err(|err| ConfigError::invalid_url(&url, err.to_string()))?;

        let mut state = GridState::new();
        if let Some(snapshot) = self.initial_state {
            state.seed(snapshot);
        }
        if !self.extra_filters.is_empty() {
            state.clear_filters();
            for filter in self.extra_filters {
                state.add_filter(filter.column, filter.values, filter.mode);
            }
        }

        Ok(Grid {
            id: self.id.0,
            url,
            state,
            extra_view_params: self.extra_view_params,
            fetcher: self
                .fetcher
                .unwrap_or_else(|| Arc::new(HttpFetcher::new())),
            surface: self.surface.unwrap_or_else(|| Box::new(ViewBuffer::new())),
            error_handler: self.error_handler,
            hooks: UpdateHookRegistry::new(),
            phase: Phase::Idle,
            latest_token: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Direction;
    use crate::state::FilterEntry;
    use crate::state::Sorting;

    #[test]
    fn test_build_rejects_an_unparsable_url() {
        let result = Grid::builder().id("g").url("not a url").build();
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_initial_state_seeds_the_grid() {
        let grid = Grid::builder()
            .id("g")
            .url("https://example.com/grid")
            .initial_state(StateSnapshot {
                page: Some(3),
                sorting: Some(Sorting::new("x", Direction::Desc)),
                filter: vec![FilterEntry {
                    slot: 0,
                    column: "name".to_string(),
                    values: vec!["abc".to_string()],
                    mode: "contains".to_string(),
                }],
            })
            .build()
            .unwrap();

        assert_eq!(grid.state().page(), Some(3));
        assert_eq!(grid.state().filter_count(), 1);
    }

    #[test]
    fn test_extra_filters_replace_seeded_filters() {
        let grid = Grid::builder()
            .id("g")
            .url("https://example.com/grid")
            .initial_state(StateSnapshot {
                page: None,
                sorting: None,
                filter: vec![
                    FilterEntry {
                        slot: 4,
                        column: "old".to_string(),
                        values: vec!["x".to_string()],
                        mode: "=".to_string(),
                    },
                    FilterEntry {
                        slot: 5,
                        column: "older".to_string(),
                        values: vec!["y".to_string()],
                        mode: "=".to_string(),
                    },
                ],
            })
            .extra_filter(FilterSpec::new("name", ["abc"], "contains"))
            .build()
            .unwrap();

        let filters = grid.state().filters();
        assert_eq!(filters.len(), 1);
        let entry = filters.get(&0).unwrap();
        assert_eq!(entry.column, "name");
        assert_eq!(entry.slot, 0);
    }
}
