//! Client-side driver for server-rendered data grids.
//!
//! A grid here is a table view whose rows are rendered by the server. The
//! client never paginates, sorts, or filters data itself; it tracks *what
//! parameters to send next* (page, sorting, filter entries), posts them as a
//! single `grid_data` form field, and applies each returned view fragment to
//! a narrow presentation boundary.

pub mod controller;
pub mod error;
pub mod fetch;
pub mod hooks;
pub mod popup;
pub mod registry;
pub mod request;
pub mod state;
pub mod surface;

pub use controller::Grid;
pub use controller::GridBuilder;
pub use controller::LOAD_ERROR_MESSAGE;
pub use controller::Phase;
pub use error::Error;
pub use fetch::Fetcher;
pub use fetch::GRID_DATA_FIELD;
pub use fetch::HttpFetcher;
pub use registry::GridRegistry;
pub use request::RequestParams;
pub use state::Direction;
pub use state::FilterEntry;
pub use state::FilterSpec;
pub use state::GridState;
pub use state::Sorting;
pub use state::StateSnapshot;
pub use surface::GridSurface;
pub use surface::ViewBuffer;
