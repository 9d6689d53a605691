//! Named, animatable view properties.
//!
//! A [`Property`] is a read/write accessor the animation engine uses to pull
//! the current value of a view attribute and push interpolated values back.
//! The render properties map straight onto [`View`] setters; [`Height`] is
//! an adapter over the layout params, which the engine could not otherwise
//! animate.

use super::Animatable;
use crate::view::{Color, Dimension, View};

/// A read/write accessor over one attribute of a [`View`]
pub trait Property<V: Animatable>: 'static {
    fn name(&self) -> &'static str;
    fn get(&self, view: &View) -> V;
    fn set(&self, view: &mut View, value: V);
}

macro_rules! render_property {
    ($(#[$meta:meta])* $name:ident, $label:literal, $ty:ty, $getter:ident, $setter:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl Property<$ty> for $name {
            fn name(&self) -> &'static str {
                $label
            }

            fn get(&self, view: &View) -> $ty {
                view.$getter()
            }

            fn set(&self, view: &mut View, value: $ty) {
                view.$setter(value);
            }
        }
    };
}

render_property!(
    /// Rotation around the pivot, in degrees
    Rotation, "rotation", f32, rotation, set_rotation
);
render_property!(TranslationX, "translationX", f32, translation_x, set_translation_x);
render_property!(TranslationY, "translationY", f32, translation_y, set_translation_y);
render_property!(ScaleX, "scaleX", f32, scale_x, set_scale_x);
render_property!(ScaleY, "scaleY", f32, scale_y, set_scale_y);
render_property!(Alpha, "alpha", f32, alpha, set_alpha);
render_property!(BackgroundColor, "backgroundColor", Color, background, set_background);

/// Laid-out height of a view, in pixels.
///
/// Setting it pins the height params to an exact size and reassigns them,
/// which re-measures the view and queues a relayout of its parent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Height;

impl Property<i32> for Height {
    fn name(&self) -> &'static str {
        "height"
    }

    fn get(&self, view: &View) -> i32 {
        view.height()
    }

    fn set(&self, view: &mut View, value: i32) {
        let mut params = view.layout_params();
        params.height = Dimension::Exact(value);
        view.set_layout_params(params);
    }
}
