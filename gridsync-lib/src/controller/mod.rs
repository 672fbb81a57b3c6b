//! The grid controller: the reload state machine.

mod builder;

pub use builder::GridBuilder;
pub use builder::Missing;
pub use builder::Set;

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::error::FetchError;
use crate::fetch::Fetcher;
use crate::hooks::UpdateHookRegistry;
use crate::request::RequestParams;
use crate::state::Direction;
use crate::state::GridState;
use crate::surface::GridSurface;

/// The fixed message handed to the error handler when a fetch fails.
pub const LOAD_ERROR_MESSAGE: &str =
    "An unexpected error occurred while loading the table. Click below to reset the view.";

/// A callback notified when a fetch fails, with the fixed user-facing message
/// and the parameters of the failed request.
pub type ErrorHandler = Box<dyn Fn(&str, &RequestParams) + Send>;

/// The controller's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No update in flight.
    Idle,
    /// An update has been dispatched and not yet applied.
    Loading,
    /// The last applied completion was a failure; the surface shows the
    /// error affordance until [`Grid::reset`] recovers.
    Error,
}

/// An update that has been dispatched but not yet applied.
///
/// Holds the request token and the parameters the request was built from.
/// Produced by [`Grid::begin_update`] and consumed by [`Grid::complete`];
/// [`Grid::update`] drives both ends around a fetch.
#[derive(Debug)]
pub struct PendingUpdate {
    token: u64,
    full: bool,
    params: RequestParams,
}

impl PendingUpdate {
    /// The parameters this update was built from.
    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    /// Whether this update replaces the view on success.
    pub fn is_full(&self) -> bool {
        self.full
    }
}

/// Drives one server-rendered grid.
///
/// The controller owns the [`GridState`] exclusively: it mutates it for user
/// actions, serializes it into a request, dispatches the request to its
/// [`Fetcher`], and applies the completion to its [`GridSurface`]. Fetch
/// failures never propagate to the caller; they become the `Error` phase and
/// a notification through the error handler.
///
/// Every dispatched update carries a monotonically increasing token. A
/// completion is applied only if its token is the latest issued, so when two
/// updates overlap the last-issued one wins regardless of arrival order.
///
/// # Example
///
/// ```ignore
/// let surface = ViewBuffer::new();
/// let mut grid = Grid::builder()
///     .id("orders")
///     .url("https://example.com/orders/grid")
///     .surface(surface.clone())
///     .build()?;
///
/// grid.update(true).await; // initial load
/// grid.sort("total", Direction::Desc).await;
/// println!("{}", surface.view());
/// ```
pub struct Grid {
    id: String,
    url: String,
    state: GridState,
    extra_view_params: serde_json::Map<String, serde_json::Value>,
    fetcher: Arc<dyn Fetcher>,
    surface: Box<dyn GridSurface>,
    error_handler: Option<ErrorHandler>,
    hooks: UpdateHookRegistry,
    phase: Phase,
    latest_token: u64,
}

impl Grid {
    /// Creates a new builder. `id` and `url` must be set before `build` is
    /// available.
    pub fn builder() -> GridBuilder<Missing, Missing> {
        GridBuilder::new()
    }

    /// Returns the grid's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the grid's URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the current state.
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Registers an update hook. Hooks run in registration order after every
    /// applied update, with the parameters that produced it.
    pub fn add_update_hook(
        &mut self,
        hook: impl Fn(&RequestParams) + Send + 'static,
    ) {
        self.hooks.register(hook);
    }

    /// Goes back to the default page and refetches.
    ///
    /// Unlike [`update`](Grid::update), this drops any page set by a previous
    /// [`to_page`](Grid::to_page) call.
    pub async fn reload(&mut self) {
        self.state.clear_page();
        self.update(true).await;
    }

    /// Loads the given page.
    pub async fn to_page(&mut self, page: u64) {
        self.state.set_page(page);
        self.update(true).await;
    }

    /// Changes the sort order.
    pub async fn sort(&mut self, column: impl Into<String>, direction: Direction) {
        self.state.set_sorting(column, direction);
        self.update(true).await;
    }

    /// Adds a filter and returns its slot.
    ///
    /// A missing or empty first value is silently dropped and no request is
    /// sent. Pass `trigger_update = false` to batch several filters before a
    /// single update.
    pub async fn add_filter(
        &mut self,
        column: impl Into<String>,
        values: Vec<String>,
        mode: impl Into<String>,
        trigger_update: bool,
    ) -> Option<u32> {
        let slot = self.state.add_filter(column, values, mode)?;
        if trigger_update {
            self.update(true).await;
        }
        Some(slot)
    }

    /// Removes the filter in the given slot and refetches.
    pub async fn remove_filter(&mut self, slot: u32) {
        self.state.remove_filter(slot);
        self.update(true).await;
    }

    /// Resets the whole state to the defaults and refetches.
    ///
    /// This is also the recovery path: the error affordance shown after a
    /// fetch failure calls this when activated.
    pub async fn reset(&mut self) {
        self.state.reset();
        self.update(true).await;
    }

    /// Builds the request, dispatches it, and applies the completion.
    ///
    /// `full` gates the view replacement, not whether a request is sent: a
    /// hook-only update (`full = false`) still performs the fetch but leaves
    /// the displayed view untouched and only runs the hooks on success.
    pub async fn update(&mut self, full: bool) {
        let pending = self.begin_update(full);
        let fetcher = Arc::clone(&self.fetcher);
        let url = self.url.clone();
        let result = fetcher.fetch(&url, pending.params()).await;
        self.complete(pending, result);
    }

    /// Builds the request parameters, enters `Loading`, and hands out the
    /// pending update to fetch against.
    ///
    /// Exposed separately from [`complete`](Grid::complete) so callers that
    /// manage their own fetch scheduling can overlap updates; the token check
    /// in `complete` keeps overlapping completions consistent.
    pub fn begin_update(&mut self, full: bool) -> PendingUpdate {
        let params = RequestParams::build(&self.state, &self.extra_view_params);
        self.latest_token += 1;
        let token = self.latest_token;

        self.phase = Phase::Loading;
        self.surface.set_loading(true);
        debug!(grid = %self.id, token, full, "dispatching update");

        PendingUpdate {
            token,
            full,
            params,
        }
    }

    /// Applies a fetch completion.
    ///
    /// A completion whose token is no longer the latest issued is discarded:
    /// a newer update owns the surface.
    pub fn complete(&mut self, pending: PendingUpdate, result: Result<String, FetchError>) {
        if pending.token != self.latest_token {
            debug!(grid = %self.id, token = pending.token, "discarding stale completion");
            return;
        }

        self.surface.set_loading(false);
        match result {
            Ok(fragment) => {
                debug!(grid = %self.id, token = pending.token, "update applied");
                self.phase = Phase::Idle;
                if pending.full {
                    self.surface.replace_view(&fragment);
                }
                self.hooks.run(&pending.params);
            }
            Err(err) => {
                warn!(grid = %self.id, token = pending.token, error = %err, "update failed");
                self.phase = Phase::Error;
                if let Some(handler) = &self.error_handler {
                    handler(LOAD_ERROR_MESSAGE, &pending.params);
                }
                self.surface.show_error();
            }
        }
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("phase", &self.phase)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
