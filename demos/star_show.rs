use std::ops::ControlFlow;
use std::time::Duration;

use property_animation::prelude::*;

fn main() -> Result<()> {
    let app = App::new().seed(2019).frame_interval(Duration::from_millis(16));
    let mut screen = app.build_screen();
    let controller = StarController::bind(&mut screen, app.config().rng())?;

    // (time, button) pairs, clicked in order once the frame clock passes them
    let mut script = vec![
        (0, StarAction::Rotate),
        (1200, StarAction::Translate),
        (1400, StarAction::Colorize),
        (2000, StarAction::Scale),
        (2700, StarAction::Fade),
        (3400, StarAction::Collapse),
        (3500, StarAction::Collapse), // dropped: button still disabled
        (3800, StarAction::Collapse),
        (4200, StarAction::Shower),
        (4300, StarAction::Shower),
        (4400, StarAction::Shower),
    ]
    .into_iter()
    .map(|(ms, action)| (Duration::from_millis(ms), action))
    .rev()
    .collect::<Vec<_>>();

    let screen = app.run(screen, move |screen, now| {
        while let Some(&(at, action)) = script.last() {
            if at > now {
                break;
            }
            script.pop();
            screen.click_by_id(action.button_id());
        }

        if script.is_empty() && !screen.has_running_animations() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    let controller = controller.borrow();
    let (started, finished) = screen.animations().stats();
    log::info!(
        "Done: {} animations started, {} finished, star {} ({}px tall), {} views left",
        started,
        finished,
        if controller.is_collapsed() {
            "collapsed"
        } else {
            "expanded"
        },
        screen
            .tree()
            .get(controller.star())
            .map(|star| star.height())
            .unwrap_or_default(),
        screen.tree().view_count()
    );
    Ok(())
}
