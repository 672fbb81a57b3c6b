//! Update hooks: callbacks notified after each applied update.

use crate::request::RequestParams;

/// A callback invoked with the parameters that produced the last applied
/// update.
pub type UpdateHook = Box<dyn Fn(&RequestParams) + Send>;

/// An ordered list of update hooks.
///
/// Hooks run in registration order and all receive the same parameter
/// structure. There is no de-registration; hooks live as long as the grid.
#[derive(Default)]
pub struct UpdateHookRegistry {
    hooks: Vec<UpdateHook>,
}

impl UpdateHookRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hook to the list.
    pub fn register(&mut self, hook: impl Fn(&RequestParams) + Send + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Runs every registered hook, in registration order.
    pub fn run(&self, params: &RequestParams) {
        for hook in &self.hooks {
            hook(params);
        }
    }

    /// Returns the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns `true` if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for UpdateHookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateHookRegistry")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GridState;

    use std::sync::Arc;
    use std::sync::Mutex;

    #[test]
    fn test_hooks_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = UpdateHookRegistry::new();

        for tag in ["first", "second", "third"] {
            let seen = Arc::clone(&seen);
            registry.register(move |_| seen.lock().unwrap().push(tag));
        }

        let params = RequestParams::build(&GridState::new(), &serde_json::Map::new());
        registry.run(&params);
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_hooks_see_the_request_params() {
        let pages = Arc::new(Mutex::new(Vec::new()));
        let mut registry = UpdateHookRegistry::new();
        {
            let pages = Arc::clone(&pages);
            registry.register(move |params: &RequestParams| {
                pages.lock().unwrap().push(params.page());
            });
        }

        let mut state = GridState::new();
        state.set_page(4);
        registry.run(&RequestParams::build(&state, &serde_json::Map::new()));
        assert_eq!(*pages.lock().unwrap(), vec![Some(4)]);
    }
}
