use super::{Animatable, Property};
use crate::view::View;

/// Type-erased [`PropertyValues`], so one animator can drive several
/// properties of different value types.
pub trait ValueHolder {
    fn property_name(&self) -> &'static str;

    /// Fill in a missing start value from the view's current value
    fn resolve_start(&mut self, view: &View);

    /// Write the value at `fraction` (already eased) into the view
    fn apply(&self, view: &mut View, fraction: f32);
}

/// Start and end values for one property.
///
/// When no start value is given, the property's current value is read when
/// the owning animator starts.
pub struct PropertyValues<V: Animatable, P: Property<V>> {
    property: P,
    from: Option<V>,
    to: V,
}

impl<V: Animatable, P: Property<V>> PropertyValues<V, P> {
    /// Animate from the current value to `to`
    pub fn of(property: P, to: V) -> Self {
        Self {
            property,
            from: None,
            to,
        }
    }

    /// Animate from `from` to `to`
    pub fn between(property: P, from: V, to: V) -> Self {
        Self {
            property,
            from: Some(from),
            to,
        }
    }
}

impl<V: Animatable, P: Property<V>> ValueHolder for PropertyValues<V, P> {
    fn property_name(&self) -> &'static str {
        self.property.name()
    }

    fn resolve_start(&mut self, view: &View) {
        if self.from.is_none() {
            self.from = Some(self.property.get(view));
        }
    }

    fn apply(&self, view: &mut View, fraction: f32) {
        if let Some(from) = &self.from {
            self.property.set(view, V::lerp(from, &self.to, fraction));
        }
    }
}
