use std::time::Duration;

use super::{
    Animatable, Animation, AnimationStatus, AnimatorListener, DEFAULT_DURATION,
    DisableDuringAnimation, Property, PropertyValues, RepeatCount, RepeatMode, TimingFunction,
    ValueHolder,
};
use crate::tree::{ViewId, ViewTree};

#[derive(Clone, Copy, Debug, PartialEq)]
enum PlayState {
    Idle,
    /// Started, waiting for the first frame to pin the start time
    Pending,
    Running {
        start_time: Duration,
        iteration: u32,
    },
    Ended,
}

/// Animates one or more properties of a single view.
///
/// # Example
/// ```ignore
/// let animator = PropertyAnimator::between(star, Rotation, -360.0, 0.0)
///     .duration(Duration::from_millis(1000))
///     .disable_view_during_animation(rotate_button);
/// scheduler.start(animator, &mut tree);
/// ```
pub struct PropertyAnimator {
    target: ViewId,
    values: Vec<Box<dyn ValueHolder>>,
    duration: Duration,
    repeat_count: RepeatCount,
    repeat_mode: RepeatMode,
    timing: TimingFunction,
    listeners: Vec<Box<dyn AnimatorListener>>,
    state: PlayState,
}

impl PropertyAnimator {
    /// An animator with no values yet; add them with [`values`](Self::values).
    pub fn new(target: ViewId) -> Self {
        Self {
            target,
            values: Vec::new(),
            duration: DEFAULT_DURATION,
            repeat_count: RepeatCount::default(),
            repeat_mode: RepeatMode::default(),
            timing: TimingFunction::default(),
            listeners: Vec::new(),
            state: PlayState::Idle,
        }
    }

    /// Animate `property` from its current value to `to`
    pub fn of<V: Animatable, P: Property<V>>(target: ViewId, property: P, to: V) -> Self {
        Self::new(target).values(PropertyValues::of(property, to))
    }

    /// Animate `property` from `from` to `to`
    pub fn between<V: Animatable, P: Property<V>>(
        target: ViewId,
        property: P,
        from: V,
        to: V,
    ) -> Self {
        Self::new(target).values(PropertyValues::between(property, from, to))
    }

    /// Add another property to animate alongside the existing ones
    pub fn values<V: Animatable, P: Property<V>>(mut self, values: PropertyValues<V, P>) -> Self {
        self.values.push(Box::new(values));
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn repeat_count(mut self, count: u32) -> Self {
        self.repeat_count = RepeatCount::Finite(count);
        self
    }

    pub fn repeat_infinite(mut self) -> Self {
        self.repeat_count = RepeatCount::Infinite;
        self
    }

    pub fn repeat_mode(mut self, mode: RepeatMode) -> Self {
        self.repeat_mode = mode;
        self
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn listener(mut self, listener: impl AnimatorListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Disable `view` from start to end of this animation
    pub fn disable_view_during_animation(self, view: ViewId) -> Self {
        self.listener(DisableDuringAnimation::new(view))
    }

    pub fn target(&self) -> ViewId {
        self.target
    }

    /// Duration of all iterations, or `None` when repeating forever
    pub fn total_duration(&self) -> Option<Duration> {
        match self.repeat_count {
            RepeatCount::Finite(n) => Some(self.duration * (n + 1)),
            RepeatCount::Infinite => None,
        }
    }

    fn property_names(&self) -> Vec<&'static str> {
        self.values.iter().map(|v| v.property_name()).collect()
    }

    /// Iteration, directed fraction and whether playback is complete after
    /// `elapsed` time on the clock.
    fn progress(&self, elapsed: Duration) -> (u32, f32, bool) {
        let last_iteration = match self.repeat_count {
            RepeatCount::Finite(n) => Some(n),
            RepeatCount::Infinite => None,
        };

        if self.duration.is_zero() {
            let iteration = last_iteration.unwrap_or(0);
            return (iteration, self.directed(iteration, 1.0), true);
        }

        let cycles = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        match last_iteration {
            Some(n) if cycles >= f64::from(n) + 1.0 => (n, self.directed(n, 1.0), true),
            _ => {
                let iteration = cycles.floor() as u32;
                let fraction = cycles.fract() as f32;
                (iteration, self.directed(iteration, fraction), false)
            }
        }
    }

    fn directed(&self, iteration: u32, fraction: f32) -> f32 {
        if self.repeat_mode == RepeatMode::Reverse && iteration % 2 == 1 {
            1.0 - fraction
        } else {
            fraction
        }
    }

    fn finish(&mut self, tree: &mut ViewTree) {
        self.state = PlayState::Ended;
        log::debug!("Ended {:?} on {:?}", self.property_names(), self.target);
        for listener in &mut self.listeners {
            listener.on_end(tree);
        }
    }
}

impl Animation for PropertyAnimator {
    fn start(&mut self, tree: &mut ViewTree) {
        if self.state != PlayState::Idle {
            log::warn!(
                "Ignoring start of {:?} on {:?}: already started",
                self.property_names(),
                self.target
            );
            return;
        }
        self.state = PlayState::Pending;
        log::debug!(
            "Starting {:?} on {:?} for {:?}",
            self.property_names(),
            self.target,
            self.duration
        );

        for listener in &mut self.listeners {
            listener.on_start(tree);
        }

        if let Some(view) = tree.get_mut(self.target) {
            for values in &mut self.values {
                values.resolve_start(view);
            }
            let eased = self.timing.evaluate(0.0);
            for values in &self.values {
                values.apply(view, eased);
            }
        }
    }

    fn advance(&mut self, now: Duration, tree: &mut ViewTree) -> AnimationStatus {
        let (start_time, previous_iteration) = match self.state {
            PlayState::Idle | PlayState::Ended => return AnimationStatus::Finished,
            PlayState::Pending => (now, 0),
            PlayState::Running {
                start_time,
                iteration,
            } => (start_time, iteration),
        };

        let (iteration, fraction, complete) = self.progress(now.saturating_sub(start_time));
        self.state = PlayState::Running {
            start_time,
            iteration,
        };
        for _ in previous_iteration..iteration {
            for listener in &mut self.listeners {
                listener.on_repeat(tree);
            }
        }

        let Some(view) = tree.get_mut(self.target) else {
            log::debug!("Target {:?} is gone, ending animation", self.target);
            self.finish(tree);
            return AnimationStatus::Finished;
        };

        let eased = self.timing.evaluate(fraction);
        for values in &self.values {
            values.apply(view, eased);
        }

        if complete {
            self.finish(tree);
            AnimationStatus::Finished
        } else {
            AnimationStatus::Running
        }
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    fn add_listener(&mut self, listener: Box<dyn AnimatorListener>) {
        self.listeners.push(listener);
    }

    fn is_running(&self) -> bool {
        matches!(self.state, PlayState::Pending | PlayState::Running { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::animation::property::{Alpha, Rotation, ScaleX, TranslationX};
    use crate::view::{View, ViewKind};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn setup() -> (ViewTree, ViewId, ViewId) {
        let mut tree = ViewTree::new();
        let star = tree.register(View::new(ViewKind::Frame));
        let button = tree.register(View::new(ViewKind::Button {
            label: "Go".into(),
        }));
        (tree, star, button)
    }

    #[derive(Default)]
    struct Events(Rc<RefCell<Vec<&'static str>>>);

    impl AnimatorListener for Events {
        fn on_start(&mut self, _tree: &mut ViewTree) {
            self.0.borrow_mut().push("start");
        }

        fn on_repeat(&mut self, _tree: &mut ViewTree) {
            self.0.borrow_mut().push("repeat");
        }

        fn on_end(&mut self, _tree: &mut ViewTree) {
            self.0.borrow_mut().push("end");
        }
    }

    #[test]
    fn test_linear_progress_and_final_value() {
        let (mut tree, star, _) = setup();
        let mut animator = PropertyAnimator::between(star, Rotation, -360.0, 0.0)
            .duration(ms(1000))
            .timing(TimingFunction::Linear);

        animator.start(&mut tree);
        assert_eq!(tree.get(star).unwrap().rotation(), -360.0);

        assert_eq!(animator.advance(ms(100), &mut tree), AnimationStatus::Running);
        assert_eq!(tree.get(star).unwrap().rotation(), -360.0);

        animator.advance(ms(600), &mut tree);
        assert!((tree.get(star).unwrap().rotation() + 180.0).abs() < 1e-3);

        assert_eq!(animator.advance(ms(1200), &mut tree), AnimationStatus::Finished);
        assert_eq!(tree.get(star).unwrap().rotation(), 0.0);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_missing_start_value_is_read_at_start() {
        let (mut tree, star, _) = setup();
        tree.get_mut(star).unwrap().set_translation_x(50.0);
        let mut animator = PropertyAnimator::of(star, TranslationX, -200.0)
            .timing(TimingFunction::Linear);

        animator.start(&mut tree);
        animator.advance(ms(0), &mut tree);
        animator.advance(ms(150), &mut tree);

        assert!((tree.get(star).unwrap().translation_x() + 75.0).abs() < 1e-3);
    }

    #[test]
    fn test_reverse_repeat_returns_to_start() {
        let (mut tree, star, _) = setup();
        let events = Events::default();
        let log = events.0.clone();
        let mut animator = PropertyAnimator::of(star, Alpha, 0.0)
            .repeat_count(1)
            .repeat_mode(RepeatMode::Reverse)
            .timing(TimingFunction::Linear)
            .listener(events);
        assert_eq!(animator.total_duration(), Some(ms(600)));

        animator.start(&mut tree);
        animator.advance(ms(0), &mut tree);
        animator.advance(ms(300), &mut tree);
        assert!(tree.get(star).unwrap().alpha().abs() < 1e-3);

        animator.advance(ms(450), &mut tree);
        assert!((tree.get(star).unwrap().alpha() - 0.5).abs() < 1e-3);

        assert_eq!(animator.advance(ms(700), &mut tree), AnimationStatus::Finished);
        assert_eq!(tree.get(star).unwrap().alpha(), 1.0);
        assert_eq!(*log.borrow(), vec!["start", "repeat", "end"]);
    }

    #[test]
    fn test_restart_mode_jumps_back() {
        let (mut tree, star, _) = setup();
        let mut animator = PropertyAnimator::between(star, ScaleX, 1.0, 3.0)
            .duration(ms(100))
            .repeat_count(2)
            .timing(TimingFunction::Linear);

        animator.start(&mut tree);
        animator.advance(ms(0), &mut tree);
        animator.advance(ms(150), &mut tree);
        assert!((tree.get(star).unwrap().scale_x() - 2.0).abs() < 1e-3);

        assert_eq!(animator.advance(ms(300), &mut tree), AnimationStatus::Finished);
        assert_eq!(tree.get(star).unwrap().scale_x(), 3.0);
    }

    #[test]
    fn test_infinite_repeat_never_finishes() {
        let (mut tree, star, _) = setup();
        let mut animator = PropertyAnimator::of(star, Rotation, 360.0).repeat_infinite();
        assert_eq!(animator.total_duration(), None);

        animator.start(&mut tree);
        for frame in 0..100 {
            assert_eq!(
                animator.advance(ms(frame * 50), &mut tree),
                AnimationStatus::Running
            );
        }
    }

    #[test]
    fn test_disable_view_during_animation() {
        let (mut tree, star, button) = setup();
        let mut animator = PropertyAnimator::of(star, Alpha, 0.0).disable_view_during_animation(button);

        animator.start(&mut tree);
        assert!(!tree.get(button).unwrap().is_enabled());

        animator.advance(ms(0), &mut tree);
        animator.advance(ms(200), &mut tree);
        assert!(!tree.get(button).unwrap().is_enabled());

        animator.advance(ms(300), &mut tree);
        assert!(tree.get(button).unwrap().is_enabled());
    }

    #[test]
    fn test_removed_target_ends_animation_and_fires_end() {
        let (mut tree, star, button) = setup();
        let mut animator = PropertyAnimator::of(star, Alpha, 0.0).disable_view_during_animation(button);

        animator.start(&mut tree);
        tree.unregister(star);

        assert_eq!(animator.advance(ms(16), &mut tree), AnimationStatus::Finished);
        assert!(tree.get(button).unwrap().is_enabled());
    }

    #[test]
    fn test_second_start_is_ignored() {
        let (mut tree, star, _) = setup();
        let events = Events::default();
        let log = events.0.clone();
        let mut animator = PropertyAnimator::of(star, Alpha, 0.0).listener(events);

        animator.start(&mut tree);
        animator.start(&mut tree);

        assert_eq!(*log.borrow(), vec!["start"]);
    }
}
