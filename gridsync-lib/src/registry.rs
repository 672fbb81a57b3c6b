//! Registry of mounted grids, keyed by id.

use std::collections::HashMap;

use tracing::debug;

use crate::controller::Grid;
use crate::error::ConfigError;

/// An owned registry of mounted grids.
///
/// Server-rendered markup addresses grids only by id, so whatever module
/// mounts grids and popups holds one of these and resolves ids through it.
/// It is an explicit object with a mount/unmount lifecycle, never
/// process-global state.
///
/// # Example
///
/// ```ignore
/// let grid = Grid::builder()
///     .id("orders")
///     .url("https://example.com/orders/grid")
///     .build()?;
///
/// let mut registry = GridRegistry::new();
/// registry.mount(grid).await?;
/// assert!(registry.get("orders").is_some());
/// ```
#[derive(Debug, Default)]
pub struct GridRegistry {
    grids: HashMap<String, Grid>,
}

impl GridRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a grid: registers it under its id and issues its initial load.
    ///
    /// Fails without touching the grid when the id is already taken.
    pub async fn mount(&mut self, mut grid: Grid) -> Result<(), ConfigError> {
        if self.grids.contains_key(grid.id()) {
            return Err(ConfigError::DuplicateId(grid.id().to_string()));
        }

        debug!(grid = %grid.id(), "mounting grid");
        grid.update(true).await;
        self.grids.insert(grid.id().to_string(), grid);
        Ok(())
    }

    /// Returns the mounted grid with the given id.
    pub fn get(&self, id: &str) -> Option<&Grid> {
        self.grids.get(id)
    }

    /// Returns the mounted grid with the given id, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Grid> {
        self.grids.get_mut(id)
    }

    /// Unmounts and returns the grid with the given id, if mounted.
    pub fn unmount(&mut self, id: &str) -> Option<Grid> {
        let grid = self.grids.remove(id);
        if grid.is_some() {
            debug!(grid = %id, "unmounted grid");
        }
        grid
    }

    /// Returns the ids of all mounted grids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }

    /// Returns the number of mounted grids.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Returns `true` if no grids are mounted.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
