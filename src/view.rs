//! Views: the nodes of the widget tree and their render properties.
//!
//! A [`View`] carries two groups of state:
//!
//! - **Layout state**: [`LayoutParams`], the size measured by the last layout
//!   pass and the offset inside its parent.
//! - **Render properties**: rotation, translation, scale, alpha and
//!   background colour. These never affect layout; they are applied around
//!   the view's pivot when computing visual bounds.
//!
//! Setters record what changed in the view's [`ChangeFlags`]; the tree
//! collects them after every animation tick.

use bitflags::bitflags;

use crate::layout::Size;
use crate::transform::Transform;

bitflags! {
    /// Flags indicating what aspects of a view need to be updated
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ChangeFlags: u8 {
        /// View needs layout recalculation (size/position may change)
        const NEEDS_LAYOUT = 0b01;
        /// View needs repainting (visual appearance changed)
        const NEEDS_PAINT  = 0b10;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a colour from a packed `0xAARRGGBB` value
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: ((argb >> 24) & 0xFF) as f32 / 255.0,
            r: ((argb >> 16) & 0xFF) as f32 / 255.0,
            g: ((argb >> 8) & 0xFF) as f32 / 255.0,
            b: (argb & 0xFF) as f32 / 255.0,
        }
    }

    /// Pack into `0xAARRGGBB`, rounding each channel
    pub fn to_argb(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// How one axis of a view is sized by its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    /// Fill the space the parent offers
    MatchParent,
    /// Size to content
    #[default]
    WrapContent,
    /// Exact size in pixels
    Exact(i32),
}

/// Where a child sits inside a frame container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gravity {
    #[default]
    TopStart,
    Center,
    CenterHorizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutParams {
    pub width: Dimension,
    pub height: Dimension,
    pub gravity: Gravity,
}

impl LayoutParams {
    pub const fn new(width: Dimension, height: Dimension) -> Self {
        Self {
            width,
            height,
            gravity: Gravity::TopStart,
        }
    }

    pub const fn wrap_content() -> Self {
        Self::new(Dimension::WrapContent, Dimension::WrapContent)
    }

    pub const fn match_parent() -> Self {
        Self::new(Dimension::MatchParent, Dimension::MatchParent)
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }
}

/// A named image resource with an intrinsic pixel size
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub name: &'static str,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewKind {
    /// Children overlap, placed by their gravity
    Frame,
    /// Children stacked top to bottom
    Column,
    /// Children stacked left to right
    Row,
    Button { label: String },
    Image { drawable: Drawable },
}

impl ViewKind {
    pub fn is_container(&self) -> bool {
        matches!(self, ViewKind::Frame | ViewKind::Column | ViewKind::Row)
    }
}

const BUTTON_PADDING: f32 = 16.0;
const BUTTON_CHAR_WIDTH: f32 = 9.0;
const BUTTON_HEIGHT: f32 = 48.0;

pub struct View {
    name: Option<String>,
    kind: ViewKind,
    layout_params: LayoutParams,
    /// Space offered by the parent during the last layout pass
    available: Size,
    /// Size of the children during the last layout pass (containers only)
    content: Size,
    measured: Size,
    offset: (f32, f32),
    rotation: f32,
    translation_x: f32,
    translation_y: f32,
    scale_x: f32,
    scale_y: f32,
    alpha: f32,
    background: Color,
    enabled: bool,
    change_flags: ChangeFlags,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            name: None,
            kind,
            layout_params: LayoutParams::wrap_content(),
            available: Size::zero(),
            content: Size::zero(),
            measured: Size::zero(),
            offset: (0.0, 0.0),
            rotation: 0.0,
            translation_x: 0.0,
            translation_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 1.0,
            background: Color::TRANSPARENT,
            enabled: true,
            change_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn kind(&self) -> &ViewKind {
        &self.kind
    }

    pub fn layout_params(&self) -> LayoutParams {
        self.layout_params
    }

    /// Replace the layout params and re-measure against the space the parent
    /// last offered. The new size is visible immediately; the parent picks up
    /// the change on the next layout pass.
    pub fn set_layout_params(&mut self, params: LayoutParams) {
        self.layout_params = params;
        let available = self.available;
        self.measure(available);
        self.change_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
    }

    /// Size the view would have with no layout constraints applied
    pub fn intrinsic_size(&self) -> Size {
        match &self.kind {
            ViewKind::Button { label } => Size::new(
                label.chars().count() as f32 * BUTTON_CHAR_WIDTH + 2.0 * BUTTON_PADDING,
                BUTTON_HEIGHT,
            ),
            ViewKind::Image { drawable } => drawable.size,
            ViewKind::Frame | ViewKind::Column | ViewKind::Row => self.content,
        }
    }

    /// Resolve the measured size from the layout params, the intrinsic size
    /// and the space offered by the parent.
    pub(crate) fn measure(&mut self, available: Size) -> Size {
        self.available = available;
        let intrinsic = self.intrinsic_size();
        self.measured = Size::new(
            resolve(self.layout_params.width, intrinsic.width, available.width),
            resolve(self.layout_params.height, intrinsic.height, available.height),
        );
        self.measured
    }

    pub(crate) fn set_content(&mut self, content: Size) {
        self.content = content;
    }

    pub(crate) fn available(&self) -> Size {
        self.available
    }

    pub fn measured_size(&self) -> Size {
        self.measured
    }

    /// Laid-out width in whole pixels
    pub fn width(&self) -> i32 {
        self.measured.width.round() as i32
    }

    /// Laid-out height in whole pixels
    pub fn height(&self) -> i32 {
        self.measured.height.round() as i32
    }

    /// Offset of this view's frame inside its parent
    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, x: f32, y: f32) {
        self.offset = (x, y);
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
        self.change_flags |= ChangeFlags::NEEDS_PAINT;
    }

    pub fn translation_x(&self) -> f32 {
        self.translation_x
    }

    pub fn set_translation_x(&mut self, x: f32) {
        self.translation_x = x;
        self.change_flags |= ChangeFlags::NEEDS_PAINT;
    }

    pub fn translation_y(&self) -> f32 {
        self.translation_y
    }

    pub fn set_translation_y(&mut self, y: f32) {
        self.translation_y = y;
        self.change_flags |= ChangeFlags::NEEDS_PAINT;
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn set_scale_x(&mut self, scale: f32) {
        self.scale_x = scale;
        self.change_flags |= ChangeFlags::NEEDS_PAINT;
    }

    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    pub fn set_scale_y(&mut self, scale: f32) {
        self.scale_y = scale;
        self.change_flags |= ChangeFlags::NEEDS_PAINT;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.change_flags |= ChangeFlags::NEEDS_PAINT;
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.change_flags |= ChangeFlags::NEEDS_PAINT;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.change_flags |= ChangeFlags::NEEDS_PAINT;
        }
    }

    /// Render transform in parent coordinates: scale and rotation around the
    /// pivot, then translation, then the layout offset.
    pub fn transform(&self) -> Transform {
        let pivot_x = self.offset.0 + self.measured.width / 2.0;
        let pivot_y = self.offset.1 + self.measured.height / 2.0;
        Transform::translate(pivot_x + self.translation_x, pivot_y + self.translation_y)
            .then(&Transform::rotate_degrees(self.rotation))
            .then(&Transform::scale_xy(self.scale_x, self.scale_y))
            .then(&Transform::translate(-pivot_x, -pivot_y))
    }

    /// Frame in parent coordinates, ignoring render properties
    pub fn frame(&self) -> Rect {
        Rect::new(
            self.offset.0,
            self.offset.1,
            self.measured.width,
            self.measured.height,
        )
    }

    /// Bounds in parent coordinates after render properties are applied
    pub fn visual_bounds(&self) -> Rect {
        self.transform().transform_rect(self.frame())
    }

    pub fn change_flags(&self) -> ChangeFlags {
        self.change_flags
    }

    pub(crate) fn take_change_flags(&mut self) -> ChangeFlags {
        std::mem::take(&mut self.change_flags)
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("measured", &self.measured)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

fn resolve(dimension: Dimension, intrinsic: f32, available: f32) -> f32 {
    match dimension {
        Dimension::Exact(px) => px.max(0) as f32,
        Dimension::MatchParent => available,
        Dimension::WrapContent => intrinsic.min(available),
    }
}
