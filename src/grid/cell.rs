//! Cell types: LayoutId, WidgetId, Align, CellContent, CellDim, Cell.

use slotmap::new_key_type;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_size, Result};
use crate::geometry::{Axis, Offset, Region, Size};

new_key_type! {
    /// Handle to a grid owned by a [`LayoutTree`](crate::LayoutTree). Copy, lightweight (u64).
    pub struct LayoutId;

    /// Handle to a leaf widget owned by a [`LayoutTree`](crate::LayoutTree).
    pub struct WidgetId;
}

/// Placement of a cell's content inside its partition, per axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    /// Fill the partition completely.
    Justify,
}

/// What a cell holds.
///
/// Handles are plain keys into the owning tree, so the enum is `Copy`; the
/// tree is the only owner of the referenced widget or layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CellContent {
    #[default]
    Empty,
    Widget(WidgetId),
    Layout(LayoutId),
}

impl CellContent {
    /// Whether the cell holds nothing.
    pub fn is_empty(self) -> bool {
        matches!(self, CellContent::Empty)
    }
}

/// Sizing state of a cell along one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CellDim {
    pub(crate) align: Align,
    pub(crate) forced: f32,
    pub(crate) padding_before: f32,
    pub(crate) padding_after: f32,
    /// Size after the natural pass line fixed point.
    pub(crate) natural: f32,
    pub(crate) final_size: f32,
    /// Intrinsic content size reported before line expansion.
    pub(crate) content_natural: f32,
}

impl CellDim {
    fn with_align(align: Align) -> Self {
        Self { align, ..Self::default() }
    }

    pub fn align(&self) -> Align {
        self.align
    }

    /// Forced size, or `0.0` when the content decides.
    pub fn forced_size(&self) -> f32 {
        self.forced
    }

    pub fn padding_before(&self) -> f32 {
        self.padding_before
    }

    pub fn padding_after(&self) -> f32 {
        self.padding_after
    }

    /// Sum of both paddings.
    pub fn padding(&self) -> f32 {
        self.padding_before + self.padding_after
    }

    pub fn natural_size(&self) -> f32 {
        self.natural
    }

    pub fn final_size(&self) -> f32 {
        self.final_size
    }
}

/// A single grid slot.
#[derive(Debug, Clone)]
pub struct Cell {
    pub(crate) content: CellContent,
    pub(crate) displayed: bool,
    pub(crate) visible: bool,
    pub(crate) enabled: bool,
    pub(crate) tabstop: bool,
    pub(crate) dim: [CellDim; 2],
    pub(crate) origin: Offset,
    pub(crate) member: Option<String>,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl Cell {
    /// An empty cell: start-aligned horizontally, centered vertically.
    pub fn new() -> Self {
        Self {
            content: CellContent::Empty,
            displayed: true,
            visible: true,
            enabled: true,
            tabstop: true,
            dim: [CellDim::with_align(Align::Start), CellDim::with_align(Align::Center)],
            origin: Offset::ZERO,
            member: None,
        }
    }

    pub fn content(&self) -> CellContent {
        self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the cell takes part in layout at all.
    pub fn displayed(&self) -> bool {
        self.displayed
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn tabstop(&self) -> bool {
        self.tabstop
    }

    /// Opaque data-binding tag.
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    pub fn dim(&self, axis: Axis) -> &CellDim {
        &self.dim[axis.index()]
    }

    pub fn align(&self, axis: Axis) -> Align {
        self.dim[axis.index()].align
    }

    /// Final size on both axes, valid after `compose`.
    pub fn final_size(&self) -> Size {
        Size::new(self.dim[0].final_size, self.dim[1].final_size)
    }

    /// Placed frame, valid after `locate`.
    pub fn frame(&self) -> Region {
        Region::from_parts(self.origin, self.final_size())
    }

    /// Force the cell size along `axis`; `0.0` lets the content decide.
    pub fn set_forced_size(&mut self, axis: Axis, size: f32) -> Result<()> {
        self.dim[axis.index()].forced = check_size(size)?;
        Ok(())
    }

    /// Space kept before and after the content along `axis`.
    pub fn set_padding(&mut self, axis: Axis, before: f32, after: f32) -> Result<()> {
        let (before, after) = (check_size(before)?, check_size(after)?);
        let dim = &mut self.dim[axis.index()];
        dim.padding_before = before;
        dim.padding_after = after;
        Ok(())
    }

    /// Same padding on both sides of each axis.
    pub fn set_padding2(&mut self, vertical: f32, horizontal: f32) -> Result<()> {
        self.set_padding(Axis::Vertical, vertical, vertical)?;
        self.set_padding(Axis::Horizontal, horizontal, horizontal)
    }

    /// CSS-ordered padding: top, right, bottom, left.
    pub fn set_padding4(&mut self, top: f32, right: f32, bottom: f32, left: f32) -> Result<()> {
        self.set_padding(Axis::Vertical, top, bottom)?;
        self.set_padding(Axis::Horizontal, left, right)
    }

    pub fn set_align(&mut self, axis: Axis, align: Align) {
        self.dim[axis.index()].align = align;
    }

    pub fn set_halign(&mut self, align: Align) {
        self.set_align(Axis::Horizontal, align);
    }

    pub fn set_valign(&mut self, align: Align) {
        self.set_align(Axis::Vertical, align);
    }

    /// Exclude the cell from layout without touching its content.
    pub fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
    }

    pub fn set_tabstop(&mut self, tabstop: bool) {
        self.tabstop = tabstop;
    }

    pub fn set_member(&mut self, member: Option<String>) {
        self.member = member;
    }
}
