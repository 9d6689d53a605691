use std::time::Duration;

use super::{Animation, AnimationStatus};
use crate::tree::ViewTree;

/// Owns every running animation and advances them once per frame.
///
/// Animations started from different places are independent: there is no
/// cancellation and no ordering between them beyond the order they were
/// started in.
#[derive(Default)]
pub struct AnimationScheduler {
    running: Vec<Box<dyn Animation>>,
    last_frame: Option<Duration>,
    started: u64,
    finished: u64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `animation` now and keep it until it ends.
    ///
    /// Start callbacks run before this returns; the animation clock starts
    /// at the next [`tick`](Self::tick).
    pub fn start(&mut self, animation: impl Animation + 'static, tree: &mut ViewTree) {
        self.start_boxed(Box::new(animation), tree);
    }

    pub fn start_boxed(&mut self, mut animation: Box<dyn Animation>, tree: &mut ViewTree) {
        animation.start(tree);
        self.started += 1;
        self.running.push(animation);
    }

    /// Advance every running animation to frame time `now`, dropping the
    /// ones that finish. Returns how many are still running.
    pub fn tick(&mut self, now: Duration, tree: &mut ViewTree) -> usize {
        if let Some(last) = self.last_frame
            && now < last
        {
            log::warn!("Frame time went backwards: {:?} -> {:?}", last, now);
        }
        self.last_frame = Some(now);

        let before = self.running.len();
        self.running
            .retain_mut(|animation| animation.advance(now, tree) == AnimationStatus::Running);
        let ended = before - self.running.len();
        self.finished += ended as u64;

        if ended > 0 {
            log::debug!(
                "{} animation(s) ended at {:?}, {} still running",
                ended,
                now,
                self.running.len()
            );
        }
        self.running.len()
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    /// Total animations started and finished since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.started, self.finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::PropertyAnimator;
    use crate::animation::property::{Alpha, Rotation};
    use crate::view::{View, ViewKind};

    #[test]
    fn test_independent_animations_end_separately() {
        let mut tree = ViewTree::new();
        let star = tree.register(View::new(ViewKind::Frame));
        let mut scheduler = AnimationScheduler::new();

        scheduler.start(
            PropertyAnimator::of(star, Alpha, 0.0).duration(Duration::from_millis(100)),
            &mut tree,
        );
        scheduler.tick(Duration::from_millis(0), &mut tree);
        scheduler.start(
            PropertyAnimator::of(star, Rotation, 90.0).duration(Duration::from_millis(100)),
            &mut tree,
        );

        assert_eq!(scheduler.tick(Duration::from_millis(50), &mut tree), 2);
        assert_eq!(scheduler.tick(Duration::from_millis(100), &mut tree), 1);
        assert_eq!(tree.get(star).unwrap().alpha(), 0.0);
        assert_eq!(scheduler.tick(Duration::from_millis(150), &mut tree), 0);
        assert_eq!(tree.get(star).unwrap().rotation(), 90.0);
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.stats(), (2, 2));
    }
}
