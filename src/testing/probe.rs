//! Probe controls that record what the solver told them.

use std::any::Any;

use crate::geometry::{Axis, Offset, Region, Size};
use crate::widget::Control;

/// A widget with a fixed natural size.
///
/// By default it keeps its natural size when asked to grow; use
/// [`stretching`](Fixed::stretching) to make it take whatever it is given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixed {
    pub width: f32,
    pub height: f32,
    stretch: bool,
    focusable: bool,
    /// Frame from the last `set_frame`.
    pub frame: Option<Region>,
    pub visible: Option<bool>,
    pub enabled: Option<bool>,
}

impl Fixed {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// A fixed-size widget that takes part in the tab order.
    pub fn focusable(width: f32, height: f32) -> Self {
        Self {
            focusable: true,
            ..Self::new(width, height)
        }
    }

    /// Accept any size the cell requires.
    pub fn stretching(mut self) -> Self {
        self.stretch = true;
        self
    }
}

impl Control for Fixed {
    fn natural_size(&mut self, axis: Axis, _cross: Option<f32>) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    fn expand(&mut self, _axis: Axis, natural: f32, required: f32) -> f32 {
        if self.stretch {
            required
        } else {
            natural
        }
    }

    fn set_frame(&mut self, origin: Offset, size: Size) {
        self.frame = Some(Region::from_parts(origin, size));
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = Some(visible);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = Some(enabled);
    }

    fn accepts_focus(&self) -> bool {
        self.focusable
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Wrapping text: its height depends on the width it was given.
///
/// `text_width` units of text laid out in lines of the resolved width, each
/// line `line_height` tall.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wrap {
    pub text_width: f32,
    pub line_height: f32,
    /// Width passed with the last vertical natural-size query.
    pub last_cross: Option<f32>,
}

impl Wrap {
    pub fn new(text_width: f32, line_height: f32) -> Self {
        Self {
            text_width,
            line_height,
            last_cross: None,
        }
    }

    fn line_count(&self, width: Option<f32>) -> f32 {
        match width {
            Some(w) if w > 0.0 => (self.text_width / w).ceil().max(1.0),
            _ => 1.0,
        }
    }
}

impl Control for Wrap {
    fn natural_size(&mut self, axis: Axis, cross: Option<f32>) -> f32 {
        match axis {
            Axis::Horizontal => self.text_width,
            Axis::Vertical => {
                self.last_cross = cross;
                self.line_count(cross) * self.line_height
            }
        }
    }

    fn expand(&mut self, axis: Axis, natural: f32, required: f32) -> f32 {
        match axis {
            Axis::Horizontal => required,
            Axis::Vertical => natural,
        }
    }

    fn set_frame(&mut self, _origin: Offset, _size: Size) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
