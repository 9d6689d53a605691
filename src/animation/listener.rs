//! Animation lifecycle listeners.
//!
//! Listeners receive the [`ViewTree`] so they can react to lifecycle events
//! by mutating views: disabling the button that triggered an animation,
//! removing a transient view once it has finished falling, and so on.

use crate::tree::{ViewId, ViewTree};

/// Lifecycle callbacks. Every method defaults to a no-op so implementors
/// only override the events they care about.
///
/// For a single animation, `on_start` and `on_end` are each called exactly
/// once, in that order. `on_repeat` is called once per iteration boundary in
/// between.
pub trait AnimatorListener {
    fn on_start(&mut self, _tree: &mut ViewTree) {}

    fn on_repeat(&mut self, _tree: &mut ViewTree) {}

    fn on_end(&mut self, _tree: &mut ViewTree) {}
}

/// Disables a view while the animation runs and re-enables it at the end.
#[derive(Debug, Clone, Copy)]
pub struct DisableDuringAnimation {
    view: ViewId,
}

impl DisableDuringAnimation {
    pub fn new(view: ViewId) -> Self {
        Self { view }
    }
}

impl AnimatorListener for DisableDuringAnimation {
    fn on_start(&mut self, tree: &mut ViewTree) {
        if let Some(view) = tree.get_mut(self.view) {
            view.set_enabled(false);
        }
    }

    fn on_end(&mut self, tree: &mut ViewTree) {
        if let Some(view) = tree.get_mut(self.view) {
            view.set_enabled(true);
        }
    }
}

/// Listener that runs a closure once when the animation ends
pub struct OnEnd<F> {
    callback: Option<F>,
}

impl<F: FnOnce(&mut ViewTree)> AnimatorListener for OnEnd<F> {
    fn on_end(&mut self, tree: &mut ViewTree) {
        if let Some(callback) = self.callback.take() {
            callback(tree);
        }
    }
}

/// Create a listener from a closure called when the animation ends.
///
/// # Example
/// ```ignore
/// set.listener(on_end(move |tree| {
///     tree.remove_child(container, new_star);
/// }));
/// ```
pub fn on_end<F: FnOnce(&mut ViewTree)>(callback: F) -> OnEnd<F> {
    OnEnd {
        callback: Some(callback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{View, ViewKind};

    #[test]
    fn test_disable_during_animation() {
        let mut tree = ViewTree::new();
        let button = tree.register(View::new(ViewKind::Button {
            label: "Rotate".into(),
        }));
        let mut listener = DisableDuringAnimation::new(button);

        listener.on_start(&mut tree);
        assert!(!tree.get(button).unwrap().is_enabled());

        listener.on_end(&mut tree);
        assert!(tree.get(button).unwrap().is_enabled());
    }

    #[test]
    fn test_on_end_runs_once() {
        let mut tree = ViewTree::new();
        let mut calls = 0;
        {
            let mut listener = on_end(|_tree: &mut ViewTree| calls += 1);
            listener.on_start(&mut tree);
            listener.on_end(&mut tree);
            listener.on_end(&mut tree);
        }
        assert_eq!(calls, 1);
    }
}
