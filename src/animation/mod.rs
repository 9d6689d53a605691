//! Property animation engine.
//!
//! Animations are short-lived descriptors: they are built, handed to the
//! [`AnimationScheduler`], advanced once per frame and dropped when they end.
//!
//! - [`PropertyAnimator`] drives one or more [`PropertyValues`] on one view
//! - [`AnimatorSet`] plays several animations together
//! - [`AnimatorListener`] observes start, repeat and end

mod animatable;
mod animator;
mod listener;
pub mod property;
mod scheduler;
mod set;
mod timing;
mod values;

use std::time::Duration;

use crate::tree::ViewTree;

pub use animatable::Animatable;
pub use animator::PropertyAnimator;
pub use listener::{AnimatorListener, DisableDuringAnimation, OnEnd, on_end};
pub use property::Property;
pub use scheduler::AnimationScheduler;
pub use set::AnimatorSet;
pub use timing::TimingFunction;
pub use values::{PropertyValues, ValueHolder};

/// Duration used by a [`PropertyAnimator`] unless overridden
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// How many times an animation plays after its first run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatCount {
    Finite(u32),
    Infinite,
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::Finite(0)
    }
}

/// What a repeated iteration does
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Every iteration plays from start to end
    #[default]
    Restart,
    /// Odd iterations play from end back to start
    Reverse,
}

/// Result of advancing an animation by one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
}

/// Common interface of everything the scheduler can play.
pub trait Animation {
    /// Fire start callbacks and seed initial values.
    ///
    /// The animation clock starts on the first [`advance`](Self::advance)
    /// after this call.
    fn start(&mut self, tree: &mut ViewTree);

    /// Advance to frame time `now`. Once this returns
    /// [`AnimationStatus::Finished`] the end callbacks have fired.
    fn advance(&mut self, now: Duration, tree: &mut ViewTree) -> AnimationStatus;

    /// Duration of a single iteration
    fn duration(&self) -> Duration;

    fn set_duration(&mut self, duration: Duration);

    fn add_listener(&mut self, listener: Box<dyn AnimatorListener>);

    fn is_running(&self) -> bool;

    fn boxed(self) -> Box<dyn Animation>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}
