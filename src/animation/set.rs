use std::time::Duration;

use super::{Animation, AnimationStatus, AnimatorListener};
use crate::tree::ViewTree;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SetState {
    Idle,
    Running,
    Ended,
}

/// Plays a group of animations together.
///
/// The set starts every child at once and ends when the last child ends.
/// A duration set on the set overrides each child's own duration.
///
/// # Example
/// ```ignore
/// let set = AnimatorSet::new()
///     .play_together([mover.boxed(), rotator.boxed()])
///     .duration(Duration::from_millis(1200))
///     .listener(on_end(move |tree| {
///         tree.remove_child(container, new_star);
///     }));
/// ```
pub struct AnimatorSet {
    children: Vec<Box<dyn Animation>>,
    finished: Vec<bool>,
    duration: Option<Duration>,
    listeners: Vec<Box<dyn AnimatorListener>>,
    state: SetState,
}

impl AnimatorSet {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            finished: Vec::new(),
            duration: None,
            listeners: Vec::new(),
            state: SetState::Idle,
        }
    }

    pub fn play_together(mut self, animations: impl IntoIterator<Item = Box<dyn Animation>>) -> Self {
        self.children.extend(animations);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn listener(mut self, listener: impl AnimatorListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn finish(&mut self, tree: &mut ViewTree) {
        self.state = SetState::Ended;
        log::debug!("Ended set of {} animation(s)", self.children.len());
        for listener in &mut self.listeners {
            listener.on_end(tree);
        }
    }
}

impl Default for AnimatorSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for AnimatorSet {
    fn start(&mut self, tree: &mut ViewTree) {
        if self.state != SetState::Idle {
            log::warn!("Ignoring start of animator set: already started");
            return;
        }
        if let Some(duration) = self.duration {
            for child in &mut self.children {
                child.set_duration(duration);
            }
        }
        self.state = SetState::Running;
        self.finished = vec![false; self.children.len()];
        log::debug!(
            "Starting set of {} animation(s), duration {:?}",
            self.children.len(),
            self.duration
        );

        for listener in &mut self.listeners {
            listener.on_start(tree);
        }
        for child in &mut self.children {
            child.start(tree);
        }
    }

    fn advance(&mut self, now: Duration, tree: &mut ViewTree) -> AnimationStatus {
        if self.state != SetState::Running {
            return AnimationStatus::Finished;
        }

        for (child, finished) in self.children.iter_mut().zip(self.finished.iter_mut()) {
            if !*finished && child.advance(now, tree) == AnimationStatus::Finished {
                *finished = true;
            }
        }

        if self.finished.iter().all(|&done| done) {
            self.finish(tree);
            AnimationStatus::Finished
        } else {
            AnimationStatus::Running
        }
    }

    fn duration(&self) -> Duration {
        self.duration.unwrap_or_else(|| {
            self.children
                .iter()
                .map(|child| child.duration())
                .max()
                .unwrap_or_default()
        })
    }

    fn set_duration(&mut self, duration: Duration) {
        self.duration = Some(duration);
    }

    fn add_listener(&mut self, listener: Box<dyn AnimatorListener>) {
        self.listeners.push(listener);
    }

    fn is_running(&self) -> bool {
        self.state == SetState::Running
    }
}
