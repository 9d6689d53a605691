pub mod animation;
pub mod error;
pub mod layout;
pub mod screen;
pub mod star;
pub mod transform;
pub mod tree;
pub mod view;
pub mod widgets;

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use calloop::EventLoop;
use calloop::timer::{TimeoutAction, Timer};
use rand::SeedableRng;
use rand::rngs::StdRng;

use error::Result;
use layout::Size;
use screen::Screen;

pub mod prelude {
    pub use crate::animation::property::{
        Alpha, BackgroundColor, Height, Property, Rotation, ScaleX, ScaleY, TranslationX,
        TranslationY,
    };
    pub use crate::animation::{
        Animatable, Animation, AnimationScheduler, AnimatorListener, AnimatorSet,
        PropertyAnimator, PropertyValues, RepeatMode, TimingFunction, on_end,
    };
    pub use crate::error::{Error, Result};
    pub use crate::layout::Size;
    pub use crate::screen::{ClickContext, Screen};
    pub use crate::star::{StarAction, StarController};
    pub use crate::tree::{ViewId, ViewTree};
    pub use crate::view::{Color, Dimension, Gravity, LayoutParams, Rect, View, ViewKind};
    pub use crate::widgets::{ViewNode, button, column, frame, image, row};
    pub use crate::{App, AppConfig};
}

pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    /// Intrinsic size of the star drawable, in pixels
    pub star_size: f32,
    pub frame_interval: Duration,
    /// Seed for the shower's random sizes and paths; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Stop the frame loop after this long regardless of the update callback
    pub max_run_time: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 720,
            height: 1280,
            star_size: 96.0,
            frame_interval: Duration::from_millis(16),
            seed: None,
            max_run_time: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    pub fn viewport(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// A callback that gets called each frame before the screen advances.
/// Return `ControlFlow::Break(())` to stop the loop.
pub type UpdateCallback<'a> = Box<dyn FnMut(&mut Screen, Duration) -> ControlFlow<()> + 'a>;

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self
    }

    pub fn star_size(mut self, size: f32) -> Self {
        self.config.star_size = size;
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.config.frame_interval = interval;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn max_run_time(mut self, max: Duration) -> Self {
        self.config.max_run_time = max;
        self
    }

    /// Build the star screen described by this config.
    pub fn build_screen(&self) -> Screen {
        Screen::new(star::main_layout(self.config.star_size), self.config.viewport())
    }

    /// Drive `screen` on a fixed frame interval until `on_update` breaks or
    /// `max_run_time` elapses.
    ///
    /// # Example
    /// ```ignore
    /// let app = App::new().seed(7);
    /// let mut screen = app.build_screen();
    /// StarController::bind(&mut screen, app.config().rng())?;
    /// screen.click_by_id(star::ROTATE_BUTTON);
    ///
    /// app.run(screen, |screen, _now| {
    ///     if screen.has_running_animations() {
    ///         ControlFlow::Continue(())
    ///     } else {
    ///         ControlFlow::Break(())
    ///     }
    /// })?;
    /// ```
    pub fn run<F>(self, screen: Screen, on_update: F) -> Result<Screen>
    where
        F: FnMut(&mut Screen, Duration) -> ControlFlow<()>,
    {
        let _ = env_logger::try_init();

        struct LoopState<'a> {
            screen: Screen,
            on_update: UpdateCallback<'a>,
            started: Instant,
            max_run_time: Duration,
            painted_frames: u64,
        }

        let mut event_loop: EventLoop<LoopState> = EventLoop::try_new()?;
        let signal = event_loop.get_signal();
        let interval = self.config.frame_interval;

        event_loop
            .handle()
            .insert_source(Timer::from_duration(interval), move |_deadline, _, state| {
                let now = state.started.elapsed();
                if (state.on_update)(&mut state.screen, now).is_break()
                    || now >= state.max_run_time
                {
                    signal.stop();
                    return TimeoutAction::Drop;
                }
                if state.screen.frame(now) {
                    state.painted_frames += 1;
                }
                TimeoutAction::ToDuration(interval)
            })
            .map_err(|e| e.error)?;

        log::info!(
            "Starting frame loop: {}x{}, frame every {:?}",
            self.config.width,
            self.config.height,
            interval
        );

        let mut state = LoopState {
            screen,
            on_update: Box::new(on_update),
            started: Instant::now(),
            max_run_time: self.config.max_run_time,
            painted_frames: 0,
        };
        event_loop.run(None, &mut state, |_| {})?;

        log::info!(
            "Frame loop stopped after {:?}: {} frames, {} repainted",
            state.started.elapsed(),
            state.screen.frame_count(),
            state.painted_frames
        );
        Ok(state.screen)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
