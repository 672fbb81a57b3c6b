//! The view boundary: where applied updates land.

use std::sync::Arc;
use std::sync::Mutex;

/// The presentation capabilities a grid controller needs from its display.
///
/// The controller owns the surface while loading or in error; between updates
/// other code may read it, but only the controller writes. Everything beyond
/// these three operations (styling, positioning, focus) is presentation glue
/// the controller never sees.
pub trait GridSurface: Send {
    /// Flags the surface as loading (or clears the flag).
    fn set_loading(&mut self, loading: bool);

    /// Replaces the displayed content with a server-rendered view fragment.
    fn replace_view(&mut self, fragment: &str);

    /// Replaces the displayed content with the error affordance. Activating
    /// the affordance is the presentation layer's cue to call
    /// [`Grid::reset`](crate::controller::Grid::reset).
    fn show_error(&mut self);
}

#[derive(Debug, Default)]
struct ViewBufferInner {
    fragment: String,
    loading: bool,
    error: bool,
}

/// A headless, shareable [`GridSurface`] holding the current view fragment.
///
/// Clones share the same buffer, so a clone kept outside the grid observes
/// everything the controller applies. This is the builder default and the
/// surface the tests inspect.
///
/// # Example
///
/// ```
/// use gridsync_lib::surface::{GridSurface, ViewBuffer};
///
/// let mut surface = ViewBuffer::new();
/// let observer = surface.clone();
///
/// surface.replace_view("<tr>…</tr>");
/// assert_eq!(observer.view(), "<tr>…</tr>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ViewBuffer {
    inner: Arc<Mutex<ViewBufferInner>>,
}

impl ViewBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently displayed fragment.
    pub fn view(&self) -> String {
        self.lock().fragment.clone()
    }

    /// Returns `true` while an update is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Returns `true` while the error affordance is displayed.
    pub fn has_error(&self) -> bool {
        self.lock().error
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ViewBufferInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl GridSurface for ViewBuffer {
    fn set_loading(&mut self, loading: bool) {
        self.lock().loading = loading;
    }

    fn replace_view(&mut self, fragment: &str) {
        let mut inner = self.lock();
        inner.fragment.clear();
        inner.fragment.push_str(fragment);
        inner.error = false;
    }

    fn show_error(&mut self) {
        let mut inner = self.lock();
        inner.fragment.clear();
        inner.error = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_buffer() {
        let mut surface = ViewBuffer::new();
        let observer = surface.clone();

        surface.set_loading(true);
        surface.replace_view("<table/>");
        assert!(observer.is_loading());
        assert_eq!(observer.view(), "<table/>");
    }

    #[test]
    fn test_error_clears_the_view_and_vice_versa() {
        let mut surface = ViewBuffer::new();
        surface.replace_view("<table/>");

        surface.show_error();
        assert!(surface.has_error());
        assert_eq!(surface.view(), "");

        surface.replace_view("<table/>");
        assert!(!surface.has_error());
    }
}
