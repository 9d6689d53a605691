//! A single screen: the view tree, its running animations and the click
//! handlers attached to its views.

use std::collections::HashMap;
use std::time::Duration;

use crate::animation::{Animation, AnimationScheduler};
use crate::layout::{self, Size};
use crate::tree::{ViewId, ViewTree};
use crate::widgets::ViewNode;

/// What a click handler gets to work with
pub struct ClickContext<'a> {
    pub tree: &'a mut ViewTree,
    pub animations: &'a mut AnimationScheduler,
    /// The view that was clicked
    pub view: ViewId,
}

impl ClickContext<'_> {
    /// Start an animation on this screen's scheduler
    pub fn start(&mut self, animation: impl Animation + 'static) {
        self.animations.start(animation, self.tree);
    }
}

pub type ClickHandler = Box<dyn FnMut(&mut ClickContext<'_>)>;

pub struct Screen {
    tree: ViewTree,
    root: ViewId,
    viewport: Size,
    animations: AnimationScheduler,
    click_handlers: HashMap<ViewId, ClickHandler>,
    frames: u64,
}

impl Screen {
    /// Inflate `content` and lay it out against `viewport`.
    pub fn new(content: ViewNode, viewport: Size) -> Self {
        let mut tree = ViewTree::new();
        let root = content.inflate(&mut tree);
        tree.collect_changes();
        layout::layout(&mut tree, root, viewport);
        tree.take_layout_roots();

        log::info!(
            "Screen created: {} views, viewport {}x{}",
            tree.view_count(),
            viewport.width,
            viewport.height
        );

        Self {
            tree,
            root,
            viewport,
            animations: AnimationScheduler::new(),
            click_handlers: HashMap::new(),
            frames: 0,
        }
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn root(&self) -> ViewId {
        self.root
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn find_view_by_id(&self, name: &str) -> Option<ViewId> {
        self.tree.find_by_name(name)
    }

    /// Attach `handler` to `view`, replacing any previous handler.
    pub fn set_on_click<F>(&mut self, view: ViewId, handler: F)
    where
        F: FnMut(&mut ClickContext<'_>) + 'static,
    {
        self.click_handlers.insert(view, Box::new(handler));
    }

    /// Deliver a click to `view`.
    ///
    /// Returns `true` if a handler ran. Clicks on missing or disabled views,
    /// or views without a handler, are dropped.
    pub fn click(&mut self, view: ViewId) -> bool {
        let Some(target) = self.tree.get(view) else {
            log::warn!("Click on missing view {:?}", view);
            return false;
        };
        let name = target.name().unwrap_or("<unnamed>").to_string();
        if !target.is_enabled() {
            log::warn!("Ignoring click on disabled view `{}`", name);
            return false;
        }
        let Some(handler) = self.click_handlers.get_mut(&view) else {
            log::debug!("No click handler on `{}`", name);
            return false;
        };

        log::info!("Click on `{}`", name);
        let mut ctx = ClickContext {
            tree: &mut self.tree,
            animations: &mut self.animations,
            view,
        };
        handler(&mut ctx);
        true
    }

    /// Click the view registered under `name`
    pub fn click_by_id(&mut self, name: &str) -> bool {
        match self.find_view_by_id(name) {
            Some(view) => self.click(view),
            None => {
                log::warn!("Click on unknown view `{}`", name);
                false
            }
        }
    }

    /// Advance animations to frame time `now`, then lay out whatever they
    /// invalidated. Returns `true` if the frame needs repainting.
    pub fn frame(&mut self, now: Duration) -> bool {
        self.frames += 1;
        let running = self.animations.tick(now, &mut self.tree);
        self.tree.collect_changes();
        layout::layout_pending(&mut self.tree);

        let needs_paint = self.tree.needs_paint();
        self.tree.clear_paint_flag();
        log::trace!(
            "Frame {} at {:?}: {} running, repaint {}",
            self.frames,
            now,
            running,
            needs_paint
        );
        needs_paint
    }

    pub fn has_running_animations(&self) -> bool {
        !self.animations.is_idle()
    }

    pub fn animations(&self) -> &AnimationScheduler {
        &self.animations
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::animation::PropertyAnimator;
    use crate::animation::property::Alpha;
    use crate::view::LayoutParams;
    use crate::widgets::{button, column};

    fn screen() -> Screen {
        Screen::new(
            column()
                .layout_params(LayoutParams::match_parent())
                .child(button("fadeButton", "Fade"))
                .child(button("plainButton", "Plain")),
            Size::new(400.0, 300.0),
        )
    }

    #[test]
    fn test_click_runs_handler_only_when_enabled() {
        let mut screen = screen();
        let fade = screen.find_view_by_id("fadeButton").unwrap();
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        screen.set_on_click(fade, move |ctx| {
            counter.set(counter.get() + 1);
            let animator = PropertyAnimator::of(ctx.view, Alpha, 0.0)
                .disable_view_during_animation(ctx.view);
            ctx.start(animator);
        });

        assert!(screen.click(fade));
        assert!(!screen.click(fade));
        assert_eq!(clicks.get(), 1);

        screen.frame(Duration::from_millis(0));
        screen.frame(Duration::from_millis(300));
        assert!(!screen.has_running_animations());
        assert!(screen.click_by_id("fadeButton"));
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn test_click_without_handler_or_view() {
        let mut screen = screen();
        assert!(!screen.click_by_id("plainButton"));
        assert!(!screen.click_by_id("nope"));
    }

    #[test]
    fn test_frame_reports_paint_only_when_something_changed() {
        let mut screen = screen();
        assert!(screen.frame(Duration::from_millis(0)));
        assert!(!screen.frame(Duration::from_millis(16)));
        assert_eq!(screen.frame_count(), 2);
    }
}
