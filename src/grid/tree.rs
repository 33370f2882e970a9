//! Tree operations: create, attach, detach, structural edits, destroy.

use std::collections::VecDeque;

use slotmap::SlotMap;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::{GridError, Result};
use crate::geometry::{Axis, Region};
use crate::widget::Control;

use super::cell::{Align, Cell, CellContent, LayoutId, WidgetId};
use super::layout::Layout;

/// A leaf widget owned by the tree, plus what placement last applied to it.
pub(crate) struct WidgetSlot {
    pub(crate) control: Box<dyn Control>,
    pub(crate) parent: LayoutId,
    pub(crate) frame: Region,
    pub(crate) visible: bool,
    pub(crate) enabled: bool,
}

/// Owner of every layout and leaf widget.
///
/// All grids live in one `SlotMap`; nesting is expressed by cells holding
/// [`LayoutId`]s, and each nested layout keeps a non-owning `parent` key.
/// Destroying a layout destroys everything its cells hold, never its parent.
pub struct LayoutTree {
    pub(crate) layouts: SlotMap<LayoutId, Layout>,
    pub(crate) widgets: SlotMap<WidgetId, WidgetSlot>,
    pub(crate) config: LayoutConfig,
}

impl std::fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutTree")
            .field("layouts", &self.layouts.len())
            .field("widgets", &self.widgets.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutTree {
    /// Create an empty tree with the default [`LayoutConfig`].
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Create an empty tree with the given solver configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            layouts: SlotMap::with_key(),
            widgets: SlotMap::with_key(),
            config,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Immutable access to a layout.
    pub fn layout(&self, id: LayoutId) -> Option<&Layout> {
        self.layouts.get(id)
    }

    /// Mutable access to a layout, for partition and margin setters.
    pub fn layout_mut(&mut self, id: LayoutId) -> Option<&mut Layout> {
        self.layouts.get_mut(id)
    }

    pub(crate) fn get(&self, id: LayoutId) -> Result<&Layout> {
        self.layouts.get(id).ok_or(GridError::UnknownLayout)
    }

    pub(crate) fn get_mut(&mut self, id: LayoutId) -> Result<&mut Layout> {
        self.layouts.get_mut(id).ok_or(GridError::UnknownLayout)
    }

    pub fn cell(&self, layout: LayoutId, col: usize, row: usize) -> Result<&Cell> {
        self.get(layout)?.cell(col, row)
    }

    /// Mutable access to a cell, for size, padding and alignment setters.
    pub fn cell_mut(&mut self, layout: LayoutId, col: usize, row: usize) -> Result<&mut Cell> {
        self.get_mut(layout)?.cell_mut(col, row)
    }

    /// Whether the tree contains a layout with the given id.
    pub fn contains(&self, id: LayoutId) -> bool {
        self.layouts.contains_key(id)
    }

    /// Whether the tree contains a widget with the given id.
    pub fn contains_widget(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    /// Number of layouts, nested ones included.
    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Control> {
        self.widgets.get(id).map(|slot| slot.control.as_ref())
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Control> {
        let slot = self.widgets.get_mut(id)?;
        let control: &mut dyn Control = slot.control.as_mut();
        Some(control)
    }

    /// Downcast a widget to its concrete control type.
    pub fn control<T: 'static>(&self, id: WidgetId) -> Option<&T> {
        self.widgets.get(id)?.control.as_any().downcast_ref::<T>()
    }

    /// Frame applied to the widget by the last `locate`.
    pub fn widget_frame(&self, id: WidgetId) -> Option<Region> {
        self.widgets.get(id).map(|slot| slot.frame)
    }

    /// Frame of a layout as of the last `locate`.
    pub fn layout_frame(&self, id: LayoutId) -> Result<Region> {
        Ok(self.get(id)?.frame)
    }

    /// Cascaded visibility last applied to the widget.
    pub fn widget_visible(&self, id: WidgetId) -> Option<bool> {
        self.widgets.get(id).map(|slot| slot.visible)
    }

    /// Cascaded enabled state last applied to the widget.
    pub fn widget_enabled(&self, id: WidgetId) -> Option<bool> {
        self.widgets.get(id).map(|slot| slot.enabled)
    }

    /// Layout and `(col, row)` of the cell holding the widget.
    pub fn widget_cell(&self, id: WidgetId) -> Option<(LayoutId, usize, usize)> {
        let parent = self.widgets.get(id)?.parent;
        self.locate_content(parent, CellContent::Widget(id))
    }

    /// Layout and `(col, row)` of the cell a nested layout is attached to.
    pub fn parent_cell(&self, id: LayoutId) -> Option<(LayoutId, usize, usize)> {
        let parent = self.layouts.get(id)?.parent?;
        self.locate_content(parent, CellContent::Layout(id))
    }

    fn locate_content(&self, parent: LayoutId, content: CellContent) -> Option<(LayoutId, usize, usize)> {
        let layout = self.layouts.get(parent)?;
        let index = layout.find_content(content)?;
        let (col, row) = layout.cell_position(index);
        Some((parent, col, row))
    }

    /// Whether `ancestor` is `id` itself or one of the layouts it is nested in.
    pub fn is_ancestor(&self, ancestor: LayoutId, id: LayoutId) -> bool {
        let mut current = Some(id);
        while let Some(layout) = current {
            if layout == ancestor {
                return true;
            }
            current = self.layouts.get(layout).and_then(|l| l.parent);
        }
        false
    }

    /// Walk up to the outermost layout.
    pub fn root_of(&self, id: LayoutId) -> LayoutId {
        let mut current = id;
        while let Some(parent) = self.layouts.get(current).and_then(|l| l.parent) {
            current = parent;
        }
        current
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Create a root grid of `ncols x nrows` empty cells.
    pub fn create_layout(&mut self, ncols: usize, nrows: usize) -> Result<LayoutId> {
        let layout = Layout::new(ncols, nrows)?;
        let id = self.layouts.insert(layout);
        debug!(?id, ncols, nrows, "created layout");
        Ok(id)
    }

    /// Give a widget to the cell at `(col, row)`. The tree owns it from now on.
    pub fn attach_widget(
        &mut self,
        layout: LayoutId,
        col: usize,
        row: usize,
        control: impl Control + 'static,
    ) -> Result<WidgetId> {
        self.attach_boxed(layout, col, row, Box::new(control))
    }

    /// [`attach_widget`](Self::attach_widget) for an already boxed control.
    pub fn attach_boxed(
        &mut self,
        layout: LayoutId,
        col: usize,
        row: usize,
        control: Box<dyn Control>,
    ) -> Result<WidgetId> {
        let index = self.empty_cell(layout, col, row)?;
        let id = self.widgets.insert(WidgetSlot {
            control,
            parent: layout,
            frame: Region::EMPTY,
            visible: true,
            enabled: true,
        });
        self.layouts[layout].cells[index].content = CellContent::Widget(id);
        Ok(id)
    }

    /// Nest the root layout `sub` inside the cell at `(col, row)`.
    ///
    /// The cell switches to [`Align::Justify`] on both axes so the nested
    /// grid fills it.
    pub fn attach_layout(&mut self, layout: LayoutId, col: usize, row: usize, sub: LayoutId) -> Result<()> {
        let sub_parent = self.get(sub)?.parent;
        if sub_parent.is_some() {
            return Err(GridError::AlreadyNested);
        }
        if self.is_ancestor(sub, layout) {
            return Err(GridError::CyclicNesting);
        }
        let index = self.empty_cell(layout, col, row)?;

        let cell = &mut self.layouts[layout].cells[index];
        cell.content = CellContent::Layout(sub);
        cell.set_align(Axis::Horizontal, Align::Justify);
        cell.set_align(Axis::Vertical, Align::Justify);
        self.layouts[sub].parent = Some(layout);
        Ok(())
    }

    fn empty_cell(&self, layout: LayoutId, col: usize, row: usize) -> Result<usize> {
        let grid = self.get(layout)?;
        let index = grid.cell_index(col, row)?;
        if !grid.cells[index].is_empty() {
            return Err(GridError::CellOccupied { col, row });
        }
        Ok(index)
    }

    /// Empty the cell at `(col, row)`, destroying whatever it held.
    pub fn detach(&mut self, layout: LayoutId, col: usize, row: usize) -> Result<()> {
        let cell = self.get_mut(layout)?.cell_mut(col, row)?;
        let content = std::mem::take(&mut cell.content);
        self.destroy_content(content);
        Ok(())
    }

    /// Destroy a widget and empty the cell that held it.
    pub fn remove_widget(&mut self, id: WidgetId) -> Result<()> {
        let (layout, col, row) = self.widget_cell(id).ok_or(GridError::UnknownWidget)?;
        self.detach(layout, col, row)
    }

    /// Destroy a layout and everything it holds. A nested layout is first
    /// detached from its parent cell.
    pub fn remove_layout(&mut self, id: LayoutId) -> Result<()> {
        if let Some((parent, col, row)) = self.parent_cell(id) {
            return self.detach(parent, col, row);
        }
        self.get(id)?;
        self.destroy_content(CellContent::Layout(id));
        Ok(())
    }

    /// Free a cell's content and, for layouts, their whole subtree.
    fn destroy_content(&mut self, content: CellContent) {
        let mut queue = VecDeque::new();
        queue.push_back(content);
        while let Some(current) = queue.pop_front() {
            match current {
                CellContent::Empty => {}
                CellContent::Widget(id) => {
                    self.widgets.remove(id);
                }
                CellContent::Layout(id) => {
                    if let Some(layout) = self.layouts.remove(id) {
                        queue.extend(layout.cells.iter().map(|c| c.content));
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Visibility and enabled state
    // -----------------------------------------------------------------------

    /// Show or hide a cell. The new state reaches its widget, or every widget
    /// of its nested layout, immediately. Sizes are untouched: a hidden cell
    /// still takes space until it is no longer displayed.
    pub fn set_cell_visible(&mut self, layout: LayoutId, col: usize, row: usize, visible: bool) -> Result<()> {
        let index = self.get(layout)?.cell_index(col, row)?;
        self.layouts[layout].cells[index].visible = visible;
        let (visible, enabled) = self.inherited_flags(layout);
        self.cascade_cell(layout, index, visible, enabled);
        Ok(())
    }

    /// Enable or disable a cell, cascading like [`set_cell_visible`](Self::set_cell_visible).
    pub fn set_cell_enabled(&mut self, layout: LayoutId, col: usize, row: usize, enabled: bool) -> Result<()> {
        let index = self.get(layout)?.cell_index(col, row)?;
        self.layouts[layout].cells[index].enabled = enabled;
        let (visible, enabled) = self.inherited_flags(layout);
        self.cascade_cell(layout, index, visible, enabled);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Structural edits
    // -----------------------------------------------------------------------

    /// Insert an empty row before `at` (`at == nrows` appends).
    pub fn insert_row(&mut self, layout: LayoutId, at: usize) -> Result<()> {
        self.get_mut(layout)?.insert_line(Axis::Vertical, at)
    }

    /// Insert an empty column before `at` (`at == ncols` appends).
    pub fn insert_column(&mut self, layout: LayoutId, at: usize) -> Result<()> {
        self.get_mut(layout)?.insert_line(Axis::Horizontal, at)
    }

    /// Remove a row and destroy its cells' content.
    pub fn remove_row(&mut self, layout: LayoutId, at: usize) -> Result<()> {
        self.remove_line(layout, Axis::Vertical, at)
    }

    /// Remove a column and destroy its cells' content.
    pub fn remove_column(&mut self, layout: LayoutId, at: usize) -> Result<()> {
        self.remove_line(layout, Axis::Horizontal, at)
    }

    fn remove_line(&mut self, layout: LayoutId, axis: Axis, at: usize) -> Result<()> {
        let removed = self.get_mut(layout)?.remove_line(axis, at)?;
        for content in removed {
            self.destroy_content(content);
        }
        Ok(())
    }

    /// Move every row of the root layout `src` below the rows of `dest`.
    /// Both must have the same number of columns; `src` ceases to exist.
    pub fn append_rows(&mut self, dest: LayoutId, src: LayoutId) -> Result<()> {
        self.join(dest, src, Axis::Vertical)
    }

    /// Move every column of the root layout `src` right of the columns of
    /// `dest`. Both must have the same number of rows; `src` ceases to exist.
    pub fn append_columns(&mut self, dest: LayoutId, src: LayoutId) -> Result<()> {
        self.join(dest, src, Axis::Horizontal)
    }

    fn join(&mut self, dest: LayoutId, src: LayoutId, axis: Axis) -> Result<()> {
        self.get(dest)?;
        if self.get(src)?.parent.is_some() {
            return Err(GridError::AlreadyNested);
        }
        if self.is_ancestor(src, dest) {
            return Err(GridError::CyclicNesting);
        }
        let cross = axis.cross();
        let expected = self.layouts[dest].line_count(cross);
        let found = self.layouts[src].line_count(cross);
        if expected != found {
            return Err(GridError::AxisMismatch { axis, expected, found });
        }

        let Some(other) = self.layouts.remove(src) else {
            return Err(GridError::UnknownLayout);
        };
        let moved = self.layouts[dest].append(axis, other)?;
        for content in moved {
            match content {
                CellContent::Empty => {}
                CellContent::Widget(id) => {
                    if let Some(slot) = self.widgets.get_mut(id) {
                        slot.parent = dest;
                    }
                }
                CellContent::Layout(id) => {
                    if let Some(layout) = self.layouts.get_mut(id) {
                        layout.parent = Some(dest);
                    }
                }
            }
        }
        debug!(?dest, ?axis, "joined layouts");
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
