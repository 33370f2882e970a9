//! Control trait: the capability interface every leaf widget exposes to the solver.
//!
//! A backend wraps its native widget in a type implementing [`Control`] and
//! hands it to [`LayoutTree::attach_widget`](crate::LayoutTree::attach_widget).
//! The tree then owns it exclusively until the cell is detached or the grid
//! is destroyed.

use std::any::Any;

use crate::geometry::{Axis, Offset, Size};

// ---------------------------------------------------------------------------
// Control trait
// ---------------------------------------------------------------------------

/// Sizing and placement hooks for a leaf widget.
///
/// Control is object-safe: the tree stores `Box<dyn Control>`.
pub trait Control {
    /// Intrinsic size along `axis`.
    ///
    /// When sizing the vertical axis, `cross` carries the width already
    /// resolved for this widget so wrapping text can report its height.
    /// It is `None` for the horizontal axis.
    fn natural_size(&mut self, axis: Axis, cross: Option<f32>) -> f32;

    /// Final size along `axis` when the cell asks for `required`.
    ///
    /// Most widgets keep their natural size. Widgets that can stretch return
    /// `required`; returning more than `required` makes the partition grow.
    fn expand(&mut self, axis: Axis, natural: f32, required: f32) -> f32 {
        let _ = (axis, required);
        natural
    }

    /// Apply the placed frame.
    fn set_frame(&mut self, origin: Offset, size: Size);

    /// Apply the cascaded visibility.
    fn set_visible(&mut self, visible: bool) {
        let _ = visible;
    }

    /// Apply the cascaded enabled state.
    fn set_enabled(&mut self, enabled: bool) {
        let _ = enabled;
    }

    /// Whether this widget takes part in the tab order.
    ///
    /// Defaults to `false`. Override for interactive widgets like buttons and inputs.
    fn accepts_focus(&self) -> bool {
        false
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
