//! The star demo screen: its layout and the controller that binds each
//! button to an animation of the star.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;

use crate::animation::property::{
    Alpha, BackgroundColor, Height, Property, Rotation, ScaleX, ScaleY, TranslationX,
    TranslationY,
};
use crate::animation::{
    Animation, AnimatorSet, PropertyAnimator, PropertyValues, RepeatMode, TimingFunction, on_end,
};
use crate::error::{Error, Result};
use crate::layout::Size;
use crate::screen::{ClickContext, Screen};
use crate::tree::ViewId;
use crate::view::{Color, Dimension, Drawable, Gravity, LayoutParams, ViewKind};
use crate::widgets::{ViewNode, button, column, frame, image, row};

/// Height added to the star when expanded
pub const DELTA_SIZE: i32 = 100;
pub const DURATION: Duration = Duration::from_millis(1000);
pub const COLLAPSE_DURATION: Duration = Duration::from_millis(300);

pub const STAR: &str = "star";
pub const STAR_CONTAINER: &str = "starContainer";
pub const ROTATE_BUTTON: &str = "rotateButton";
pub const TRANSLATE_BUTTON: &str = "translateButton";
pub const SCALE_BUTTON: &str = "scaleButton";
pub const FADE_BUTTON: &str = "fadeButton";
pub const COLORIZE_BUTTON: &str = "colorizeButton";
pub const SHOWER_BUTTON: &str = "showerButton";
pub const COLLAPSE_BUTTON: &str = "collapseButton";

pub fn star_drawable(size: f32) -> Drawable {
    Drawable {
        name: "ic_star",
        size: Size::new(size, size),
    }
}

/// The main layout: a bar of buttons above a black frame with the star
/// centred in it.
pub fn main_layout(star_size: f32) -> ViewNode {
    let buttons = StarAction::ALL
        .iter()
        .map(|action| button(action.button_id(), action.label()));

    column()
        .layout_params(LayoutParams::match_parent())
        .child(
            row()
                .id("buttonBar")
                .layout_params(LayoutParams::new(
                    Dimension::MatchParent,
                    Dimension::WrapContent,
                ))
                .children(buttons),
        )
        .child(
            frame()
                .id(STAR_CONTAINER)
                .layout_params(LayoutParams::match_parent())
                .background(Color::BLACK)
                .child(image(STAR, star_drawable(star_size)).gravity(Gravity::Center)),
        )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StarAction {
    Rotate,
    Translate,
    Scale,
    Fade,
    Colorize,
    Shower,
    Collapse,
}

impl StarAction {
    pub const ALL: [StarAction; 7] = [
        StarAction::Rotate,
        StarAction::Translate,
        StarAction::Scale,
        StarAction::Fade,
        StarAction::Colorize,
        StarAction::Shower,
        StarAction::Collapse,
    ];

    pub fn button_id(self) -> &'static str {
        match self {
            StarAction::Rotate => ROTATE_BUTTON,
            StarAction::Translate => TRANSLATE_BUTTON,
            StarAction::Scale => SCALE_BUTTON,
            StarAction::Fade => FADE_BUTTON,
            StarAction::Colorize => COLORIZE_BUTTON,
            StarAction::Shower => SHOWER_BUTTON,
            StarAction::Collapse => COLLAPSE_BUTTON,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StarAction::Rotate => "Rotate",
            StarAction::Translate => "Translate",
            StarAction::Scale => "Scale",
            StarAction::Fade => "Fade",
            StarAction::Colorize => "Colorize",
            StarAction::Shower => "Shower",
            StarAction::Collapse => "Collapse",
        }
    }
}

/// Binds the demo buttons to star animations and tracks the collapse toggle.
pub struct StarController {
    star: ViewId,
    container: ViewId,
    buttons: [ViewId; 7],
    collapsed_size: i32,
    expanded_size: i32,
    is_collapsed: bool,
    rng: StdRng,
}

impl StarController {
    /// Look up the star, its container and every button on `screen` and
    /// attach a click handler to each button.
    pub fn bind(screen: &mut Screen, rng: StdRng) -> Result<Rc<RefCell<Self>>> {
        let find = |name: &str| {
            screen
                .find_view_by_id(name)
                .ok_or_else(|| Error::MissingView(name.to_string()))
        };

        let star = find(STAR)?;
        let mut buttons = [star; 7];
        for (slot, action) in buttons.iter_mut().zip(StarAction::ALL) {
            *slot = find(action.button_id())?;
        }
        let container = screen
            .tree()
            .parent(star)
            .ok_or_else(|| Error::NotAContainer(STAR.to_string()))?;
        let collapsed_size = screen
            .tree()
            .get(star)
            .map(|view| Height.get(view))
            .unwrap_or_default();

        let controller = Rc::new(RefCell::new(Self {
            star,
            container,
            buttons,
            collapsed_size,
            expanded_size: collapsed_size + DELTA_SIZE,
            is_collapsed: true,
            rng,
        }));

        for (&view, action) in buttons.iter().zip(StarAction::ALL) {
            let controller = Rc::clone(&controller);
            screen.set_on_click(view, move |ctx| controller.borrow_mut().perform(action, ctx));
        }
        log::info!(
            "Star controller bound: {} buttons, star height {}",
            buttons.len(),
            collapsed_size
        );

        Ok(controller)
    }

    pub fn perform(&mut self, action: StarAction, ctx: &mut ClickContext<'_>) {
        match action {
            StarAction::Rotate => self.rotater(ctx),
            StarAction::Translate => self.translater(ctx),
            StarAction::Scale => self.scaler(ctx),
            StarAction::Fade => self.fader(ctx),
            StarAction::Colorize => self.colorizer(ctx),
            StarAction::Shower => self.shower(ctx),
            StarAction::Collapse => {
                if self.is_collapsed {
                    self.animate_height_to(ctx, self.expanded_size);
                } else {
                    self.animate_height_to(ctx, self.collapsed_size);
                }
                self.is_collapsed = !self.is_collapsed;
            }
        }
    }

    fn button(&self, action: StarAction) -> ViewId {
        let index = StarAction::ALL
            .iter()
            .position(|&a| a == action)
            .unwrap_or_default();
        self.buttons[index]
    }

    fn rotater(&mut self, ctx: &mut ClickContext<'_>) {
        let animator = PropertyAnimator::between(self.star, Rotation, -360.0, 0.0)
            .duration(DURATION)
            .disable_view_during_animation(self.button(StarAction::Rotate));
        ctx.start(animator);
    }

    fn translater(&mut self, ctx: &mut ClickContext<'_>) {
        let animator = PropertyAnimator::of(self.star, TranslationX, -200.0)
            .repeat_count(3)
            .repeat_mode(RepeatMode::Reverse)
            .disable_view_during_animation(self.button(StarAction::Translate));
        ctx.start(animator);
    }

    fn scaler(&mut self, ctx: &mut ClickContext<'_>) {
        let animator = PropertyAnimator::new(self.star)
            .values(PropertyValues::of(TranslationX, 300.0))
            .values(PropertyValues::of(TranslationY, 300.0))
            .values(PropertyValues::of(ScaleX, 4.0))
            .values(PropertyValues::of(ScaleY, 4.0))
            .repeat_count(1)
            .repeat_mode(RepeatMode::Reverse)
            .disable_view_during_animation(self.button(StarAction::Scale));
        ctx.start(animator);
    }

    fn fader(&mut self, ctx: &mut ClickContext<'_>) {
        let animator = PropertyAnimator::of(self.star, Alpha, 0.0)
            .repeat_count(1)
            .repeat_mode(RepeatMode::Reverse)
            .disable_view_during_animation(self.button(StarAction::Fade));
        ctx.start(animator);
    }

    fn colorizer(&mut self, ctx: &mut ClickContext<'_>) {
        let animator =
            PropertyAnimator::between(self.container, BackgroundColor, Color::BLACK, Color::RED)
                .duration(DURATION)
                .repeat_count(1)
                .repeat_mode(RepeatMode::Reverse)
                .disable_view_during_animation(self.button(StarAction::Colorize));
        ctx.start(animator);
    }

    /// Drop a randomly sized star from above the container to below it,
    /// spinning as it falls. The new star is removed once it has landed.
    fn shower(&mut self, ctx: &mut ClickContext<'_>) {
        let Some(container_size) = ctx.tree.get(self.container).map(|v| v.measured_size()) else {
            log::warn!("Star container is gone, skipping shower");
            return;
        };
        let Some((drawable, star_size)) = ctx.tree.get(self.star).map(|view| {
            let drawable = match view.kind() {
                ViewKind::Image { drawable } => drawable.clone(),
                _ => star_drawable(view.measured_size().height),
            };
            (drawable, view.measured_size())
        }) else {
            log::warn!("Star is gone, skipping shower");
            return;
        };

        let scale = self.rng.random::<f32>() * 1.6 + 0.1;
        let star_w = star_size.width * scale;
        let star_h = star_size.height * scale;

        let new_star = ViewNode::new(ViewKind::Image { drawable })
            .layout_params(LayoutParams::wrap_content())
            .inflate(ctx.tree);
        ctx.tree.add_child(self.container, new_star);
        if let Some(view) = ctx.tree.get_mut(new_star) {
            view.set_scale_x(scale);
            view.set_scale_y(scale);
            view.set_translation_x(self.rng.random::<f32>() * container_size.width - star_w / 2.0);
        }

        let mover = PropertyAnimator::between(
            new_star,
            TranslationY,
            -star_h,
            container_size.height + star_h,
        )
        .timing(TimingFunction::Accelerate(1.0));
        let rotator = PropertyAnimator::of(new_star, Rotation, self.rng.random::<f32>() * 1080.0)
            .timing(TimingFunction::Linear);
        let duration = Duration::from_millis((self.rng.random::<f32>() * 1500.0 + 500.0) as u64);

        let container = self.container;
        let set = AnimatorSet::new()
            .play_together([mover.boxed(), rotator.boxed()])
            .duration(duration)
            .listener(on_end(move |tree| {
                let landed = tree.get(new_star).map(|view| view.visual_bounds());
                if tree.remove_child(container, new_star) {
                    log::debug!("Removed shower star {:?} landed at {:?}", new_star, landed);
                }
            }));
        log::debug!(
            "Shower star {:?}: scale {:.2}, falling for {:?}",
            new_star,
            scale,
            duration
        );
        ctx.start(set);
    }

    fn animate_height_to(&mut self, ctx: &mut ClickContext<'_>, height: i32) {
        let current = ctx
            .tree
            .get(self.star)
            .map(|view| Height.get(view))
            .unwrap_or(height);
        let animator = PropertyAnimator::between(self.star, Height, current, height)
            .duration(COLLAPSE_DURATION)
            .timing(TimingFunction::Decelerate(1.0))
            .disable_view_during_animation(self.button(StarAction::Collapse));
        ctx.start(animator);
    }

    pub fn is_collapsed(&self) -> bool {
        self.is_collapsed
    }

    pub fn collapsed_size(&self) -> i32 {
        self.collapsed_size
    }

    pub fn expanded_size(&self) -> i32 {
        self.expanded_size
    }

    pub fn star(&self) -> ViewId {
        self.star
    }

    pub fn container(&self) -> ViewId {
        self.container
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn bound_screen() -> (Screen, Rc<RefCell<StarController>>) {
        let mut screen = Screen::new(main_layout(96.0), Size::new(720.0, 1280.0));
        let controller = StarController::bind(&mut screen, StdRng::seed_from_u64(7)).unwrap();
        (screen, controller)
    }

    #[test]
    fn test_bind_reads_sizes_from_layout() {
        let (_screen, controller) = bound_screen();
        let controller = controller.borrow();
        assert_eq!(controller.collapsed_size(), 96);
        assert_eq!(controller.expanded_size(), 196);
        assert!(controller.is_collapsed());
    }

    #[test]
    fn test_bind_fails_on_missing_button() {
        let mut screen = Screen::new(
            frame()
                .layout_params(LayoutParams::match_parent())
                .child(image(STAR, star_drawable(96.0))),
            Size::new(400.0, 400.0),
        );
        let err = StarController::bind(&mut screen, StdRng::seed_from_u64(1)).err();
        assert!(matches!(err, Some(Error::MissingView(name)) if name == ROTATE_BUTTON));
    }

    #[test]
    fn test_rotate_spins_star_back_to_rest() {
        let (mut screen, controller) = bound_screen();
        let star = controller.borrow().star();

        assert!(screen.click_by_id(ROTATE_BUTTON));
        assert_eq!(screen.tree().get(star).unwrap().rotation(), -360.0);

        screen.frame(Duration::ZERO);
        screen.frame(Duration::from_millis(500));
        let mid = screen.tree().get(star).unwrap().rotation();
        assert!(mid > -360.0 && mid < 0.0);

        screen.frame(DURATION);
        assert!(screen.tree().get(star).unwrap().rotation().abs() < 1e-3);
    }

    #[test]
    fn test_scale_peaks_then_returns() {
        let (mut screen, controller) = bound_screen();
        let star = controller.borrow().star();

        screen.click_by_id(SCALE_BUTTON);
        screen.frame(Duration::ZERO);
        screen.frame(Duration::from_millis(300));
        let view = screen.tree().get(star).unwrap();
        assert!((view.scale_x() - 4.0).abs() < 1e-3);
        assert!((view.translation_y() - 300.0).abs() < 1e-3);

        screen.frame(Duration::from_millis(600));
        let view = screen.tree().get(star).unwrap();
        assert!((view.scale_y() - 1.0).abs() < 1e-3);
        assert!(view.translation_x().abs() < 1e-3);
    }

    #[test]
    fn test_colorize_targets_container_background() {
        let (mut screen, controller) = bound_screen();
        let container = controller.borrow().container();

        screen.click_by_id(COLORIZE_BUTTON);
        screen.frame(Duration::ZERO);
        screen.frame(DURATION / 2);
        let background = screen.tree().get(container).unwrap().background();
        assert_eq!(background.to_argb(), 0xFFBA_0000);

        screen.frame(DURATION);
        let background = screen.tree().get(container).unwrap().background();
        assert_eq!(background.to_argb(), Color::RED.to_argb());

        screen.frame(DURATION * 2);
        let background = screen.tree().get(container).unwrap().background();
        assert_eq!(background.to_argb(), Color::BLACK.to_argb());
    }

    #[test]
    fn test_collapse_expands_star_and_recenters_it() {
        let (mut screen, controller) = bound_screen();
        let star = controller.borrow().star();
        let offset_before = screen.tree().get(star).unwrap().offset();

        screen.click_by_id(COLLAPSE_BUTTON);
        screen.frame(Duration::ZERO);
        screen.frame(COLLAPSE_DURATION);

        let view = screen.tree().get(star).unwrap();
        assert_eq!(view.height(), 196);
        assert_eq!(view.width(), 96);
        assert_eq!(view.offset().1, offset_before.1 - 50.0);
    }
}
