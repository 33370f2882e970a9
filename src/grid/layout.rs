//! The grid itself: cells, partitions, margins and structural edits.
//!
//! A [`Layout`] stores its cells row-major. Lines on the horizontal axis are
//! columns, lines on the vertical axis are rows; [`Layout::line_cells`] yields
//! the cell indices of either kind.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_size, check_weight, GridError, Result};
use crate::geometry::{Axis, Region, Size};

use super::cell::{Cell, CellContent, LayoutId, WidgetId};
use super::line::{clear_trailing_margin, initial_lines, renormalize, weight_sum, LineDim};

/// Order in which focusable cells are visited.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TabOrder {
    #[default]
    RowMajor,
    ColumnMajor,
}

/// An `ncols x nrows` grid of cells plus per-axis partitions and margins.
#[derive(Debug, Clone)]
pub struct Layout {
    pub(crate) ncols: usize,
    pub(crate) nrows: usize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) lines: [Vec<LineDim>; 2],
    pub(crate) margin_before: [f32; 2],
    pub(crate) margin_after: [f32; 2],
    /// Owning layout when nested. Never traversed on destruction.
    pub(crate) parent: Option<LayoutId>,
    pub(crate) tab_order: TabOrder,
    pub(crate) binding: Option<String>,
    pub(crate) natural: [f32; 2],
    /// Request the last expansion on each axis resolved, until the next
    /// natural pass.
    pub(crate) expanded: [Option<f32>; 2],
    pub(crate) final_size: Size,
    pub(crate) frame: Region,
    /// Size requested by the last `compose` on this layout.
    pub(crate) required: Option<Size>,
    /// Focus sequence produced by the last `locate` on this layout.
    pub(crate) tab_chain: Vec<WidgetId>,
}

impl Layout {
    /// Create a grid of empty cells.
    pub(crate) fn new(ncols: usize, nrows: usize) -> Result<Self> {
        if ncols == 0 || nrows == 0 {
            return Err(GridError::ZeroSizeGrid { ncols, nrows });
        }
        Ok(Self {
            ncols,
            nrows,
            cells: (0..ncols * nrows).map(|_| Cell::new()).collect(),
            lines: [initial_lines(ncols), initial_lines(nrows)],
            margin_before: [0.0; 2],
            margin_after: [0.0; 2],
            parent: None,
            tab_order: TabOrder::RowMajor,
            binding: None,
            natural: [0.0; 2],
            expanded: [None; 2],
            final_size: Size::ZERO,
            frame: Region::EMPTY,
            required: None,
            tab_chain: Vec::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Shape and lookup
    // -----------------------------------------------------------------------

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of partitions along `axis`.
    pub fn line_count(&self, axis: Axis) -> usize {
        self.lines[axis.index()].len()
    }

    /// The layout this one is nested in, if any.
    pub fn parent(&self) -> Option<LayoutId> {
        self.parent
    }

    pub(crate) fn cell_index(&self, col: usize, row: usize) -> Result<usize> {
        if col >= self.ncols || row >= self.nrows {
            return Err(GridError::CellOutOfBounds {
                col,
                row,
                ncols: self.ncols,
                nrows: self.nrows,
            });
        }
        Ok(row * self.ncols + col)
    }

    /// `(col, row)` of a row-major cell index.
    pub(crate) fn cell_position(&self, index: usize) -> (usize, usize) {
        (index % self.ncols, index / self.ncols)
    }

    pub fn cell(&self, col: usize, row: usize) -> Result<&Cell> {
        let index = self.cell_index(col, row)?;
        Ok(&self.cells[index])
    }

    pub fn cell_mut(&mut self, col: usize, row: usize) -> Result<&mut Cell> {
        let index = self.cell_index(col, row)?;
        Ok(&mut self.cells[index])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn line(&self, axis: Axis, index: usize) -> Result<&LineDim> {
        let lines = &self.lines[axis.index()];
        lines.get(index).ok_or(GridError::LineOutOfBounds {
            axis,
            index,
            count: lines.len(),
        })
    }

    pub fn lines(&self, axis: Axis) -> &[LineDim] {
        &self.lines[axis.index()]
    }

    fn line_mut(&mut self, axis: Axis, index: usize) -> Result<&mut LineDim> {
        let lines = &mut self.lines[axis.index()];
        let count = lines.len();
        lines
            .get_mut(index)
            .ok_or(GridError::LineOutOfBounds { axis, index, count })
    }

    /// Row-major cell indices belonging to one line.
    pub(crate) fn line_cells(&self, axis: Axis, line: usize) -> impl Iterator<Item = usize> {
        let ncols = self.ncols;
        let (start, step, count) = match axis {
            Axis::Horizontal => (line, ncols, self.nrows),
            Axis::Vertical => (line * ncols, 1, ncols),
        };
        (0..count).map(move |k| start + k * step)
    }

    /// Whether the cell takes space: it and both of its lines are displayed.
    pub(crate) fn cell_shown(&self, index: usize) -> bool {
        let (col, row) = self.cell_position(index);
        self.cells[index].displayed && self.lines[0][col].displayed && self.lines[1][row].displayed
    }

    /// Cell index holding `content`, if any.
    pub(crate) fn find_content(&self, content: CellContent) -> Option<usize> {
        self.cells.iter().position(|c| c.content == content)
    }

    // -----------------------------------------------------------------------
    // Read-back
    // -----------------------------------------------------------------------

    /// Natural size computed by the last natural pass.
    pub fn natural_size(&self) -> Size {
        Size::new(self.natural[0], self.natural[1])
    }

    /// Size resolved by the last `compose`.
    pub fn final_size(&self) -> Size {
        self.final_size
    }

    /// Frame assigned by the last `locate`.
    pub fn frame(&self) -> Region {
        self.frame
    }

    pub fn line_final_size(&self, axis: Axis, index: usize) -> Result<f32> {
        Ok(self.line(axis, index)?.final_size)
    }

    pub fn cell_final_size(&self, col: usize, row: usize) -> Result<Size> {
        Ok(self.cell(col, row)?.final_size())
    }

    pub fn cell_frame(&self, col: usize, row: usize) -> Result<Region> {
        Ok(self.cell(col, row)?.frame())
    }

    /// Outer margins along `axis` as `(before, after)`.
    pub fn margins(&self, axis: Axis) -> (f32, f32) {
        let a = axis.index();
        (self.margin_before[a], self.margin_after[a])
    }

    /// Sum of the resize weights along `axis`.
    pub fn weight_sum(&self, axis: Axis) -> f32 {
        weight_sum(&self.lines[axis.index()])
    }

    pub fn tab_order(&self) -> TabOrder {
        self.tab_order
    }

    /// Opaque data-binding type tag.
    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Force the size of one partition; `0.0` lets the cells decide.
    pub fn set_line_forced_size(&mut self, axis: Axis, index: usize, size: f32) -> Result<()> {
        let size = check_size(size)?;
        self.line_mut(axis, index)?.forced = size;
        Ok(())
    }

    /// Space between partition `index` and the next one.
    ///
    /// The last partition never has a trailing margin; the outer margin
    /// covers that side.
    pub fn set_line_margin(&mut self, axis: Axis, index: usize, margin: f32) -> Result<()> {
        let margin = check_size(margin)?;
        let count = self.line_count(axis);
        if index + 1 >= count {
            return Err(GridError::LineOutOfBounds {
                axis,
                index,
                count: count - 1,
            });
        }
        self.line_mut(axis, index)?.margin_after = margin;
        Ok(())
    }

    /// Show or hide a whole row or column.
    pub fn set_line_displayed(&mut self, axis: Axis, index: usize, displayed: bool) -> Result<()> {
        self.line_mut(axis, index)?.displayed = displayed;
        Ok(())
    }

    /// Replace every weight along `axis`; the values are renormalized to sum to one.
    pub fn set_line_weights(&mut self, axis: Axis, weights: &[f32]) -> Result<()> {
        let count = self.line_count(axis);
        if weights.len() != count {
            return Err(GridError::AxisMismatch {
                axis,
                expected: count,
                found: weights.len(),
            });
        }
        for &w in weights {
            check_weight(w)?;
        }
        let lines = &mut self.lines[axis.index()];
        for (line, &w) in lines.iter_mut().zip(weights) {
            line.weight = w;
        }
        renormalize(lines);
        Ok(())
    }

    /// Give all extra space along `axis` to one partition.
    pub fn set_expand(&mut self, axis: Axis, index: usize) -> Result<()> {
        self.line(axis, index)?;
        for (i, line) in self.lines[axis.index()].iter_mut().enumerate() {
            line.weight = if i == index { 1.0 } else { 0.0 };
        }
        Ok(())
    }

    /// Split extra space between two partitions: `exp` to the first, the
    /// rest to the second. `exp` is clamped to `[0, 1]`.
    pub fn set_expand2(&mut self, axis: Axis, first: usize, second: usize, exp: f32) -> Result<()> {
        check_weight(exp)?;
        self.line(axis, first)?;
        self.line(axis, second)?;
        let exp = exp.min(1.0);
        for line in self.lines[axis.index()].iter_mut() {
            line.weight = 0.0;
        }
        let lines = &mut self.lines[axis.index()];
        lines[first].weight += exp;
        lines[second].weight += 1.0 - exp;
        Ok(())
    }

    /// Split extra space between three partitions: `exp0` to the first,
    /// `exp1` to the second and the rest to the third.
    pub fn set_expand3(
        &mut self,
        axis: Axis,
        first: usize,
        second: usize,
        third: usize,
        exp0: f32,
        exp1: f32,
    ) -> Result<()> {
        check_weight(exp0)?;
        check_weight(exp1)?;
        self.line(axis, first)?;
        self.line(axis, second)?;
        self.line(axis, third)?;
        let exp0 = exp0.min(1.0);
        let exp1 = exp1.min(1.0 - exp0);
        for line in self.lines[axis.index()].iter_mut() {
            line.weight = 0.0;
        }
        let lines = &mut self.lines[axis.index()];
        lines[first].weight += exp0;
        lines[second].weight += exp1;
        lines[third].weight += 1.0 - exp0 - exp1;
        Ok(())
    }

    /// Outer margins along one axis.
    pub fn set_axis_margins(&mut self, axis: Axis, before: f32, after: f32) -> Result<()> {
        let (before, after) = (check_size(before)?, check_size(after)?);
        let a = axis.index();
        self.margin_before[a] = before;
        self.margin_after[a] = after;
        Ok(())
    }

    /// Same outer margin on all four sides.
    pub fn set_margin(&mut self, margin: f32) -> Result<()> {
        self.set_margin4(margin, margin, margin, margin)
    }

    /// Outer margins: `vertical` on top and bottom, `horizontal` on left and right.
    pub fn set_margin2(&mut self, vertical: f32, horizontal: f32) -> Result<()> {
        self.set_margin4(vertical, horizontal, vertical, horizontal)
    }

    /// CSS-ordered outer margins: top, right, bottom, left.
    pub fn set_margin4(&mut self, top: f32, right: f32, bottom: f32, left: f32) -> Result<()> {
        for value in [top, right, bottom, left] {
            check_size(value)?;
        }
        self.set_axis_margins(Axis::Vertical, top, bottom)?;
        self.set_axis_margins(Axis::Horizontal, left, right)
    }

    pub fn set_tab_order(&mut self, order: TabOrder) {
        self.tab_order = order;
    }

    pub fn set_binding(&mut self, binding: Option<String>) {
        self.binding = binding;
    }

    // -----------------------------------------------------------------------
    // Structural edits
    // -----------------------------------------------------------------------

    /// Insert an empty row (vertical) or column (horizontal) before `at`.
    pub(crate) fn insert_line(&mut self, axis: Axis, at: usize) -> Result<()> {
        let count = self.line_count(axis);
        if at > count {
            return Err(GridError::LineOutOfBounds { axis, index: at, count });
        }

        match axis {
            Axis::Vertical => {
                let start = at * self.ncols;
                self.cells
                    .splice(start..start, (0..self.ncols).map(|_| Cell::new()));
                self.nrows += 1;
            }
            Axis::Horizontal => {
                let old = std::mem::take(&mut self.cells);
                let width = self.ncols + 1;
                let mut cells = Vec::with_capacity(width * self.nrows);
                let mut old = old.into_iter();
                for _ in 0..self.nrows {
                    for col in 0..width {
                        if col == at {
                            cells.push(Cell::new());
                        } else if let Some(cell) = old.next() {
                            cells.push(cell);
                        }
                    }
                }
                self.cells = cells;
                self.ncols = width;
            }
        }

        let lines = &mut self.lines[axis.index()];
        lines.insert(at, LineDim::new(0.0));
        clear_trailing_margin(lines);
        renormalize(lines);
        debug_assert_eq!(self.cells.len(), self.ncols * self.nrows);
        Ok(())
    }

    /// Remove a row or column, returning the content of its cells so the
    /// caller can destroy it.
    pub(crate) fn remove_line(
        &mut self,
        axis: Axis,
        at: usize,
    ) -> Result<Vec<CellContent>> {
        let count = self.line_count(axis);
        if at >= count {
            return Err(GridError::LineOutOfBounds { axis, index: at, count });
        }
        if count == 1 {
            return Err(GridError::LastLine { axis });
        }

        let removed: Vec<CellContent> = self
            .line_cells(axis, at)
            .map(|index| self.cells[index].content)
            .collect();

        match axis {
            Axis::Vertical => {
                let start = at * self.ncols;
                self.cells.drain(start..start + self.ncols);
                self.nrows -= 1;
            }
            Axis::Horizontal => {
                let ncols = self.ncols;
                let old = std::mem::take(&mut self.cells);
                self.cells = old
                    .into_iter()
                    .enumerate()
                    .filter(|(index, _)| index % ncols != at)
                    .map(|(_, cell)| cell)
                    .collect();
                self.ncols -= 1;
            }
        }

        let lines = &mut self.lines[axis.index()];
        lines.remove(at);
        clear_trailing_margin(lines);
        renormalize(lines);
        debug_assert_eq!(self.cells.len(), self.ncols * self.nrows);
        Ok(removed)
    }

    /// Concatenate `other` after this grid along `axis`: below for vertical,
    /// to the right for horizontal. The cross axis line counts must match.
    ///
    /// Returns the moved content so the caller can reparent it.
    pub(crate) fn append(
        &mut self,
        axis: Axis,
        other: Layout,
    ) -> Result<Vec<CellContent>> {
        let cross = axis.cross();
        let expected = self.line_count(cross);
        let found = other.line_count(cross);
        if expected != found {
            return Err(GridError::AxisMismatch { axis, expected, found });
        }

        let moved: Vec<CellContent> = other.cells.iter().map(|c| c.content).collect();
        let Layout { ncols, nrows, cells, lines: [other_cols, other_rows], .. } = other;

        match axis {
            Axis::Vertical => {
                self.cells.extend(cells);
                self.nrows += nrows;
            }
            Axis::Horizontal => {
                let width = self.ncols + ncols;
                let mut merged = Vec::with_capacity(width * self.nrows);
                let mut left = std::mem::take(&mut self.cells).into_iter();
                let mut right = cells.into_iter();
                for _ in 0..self.nrows {
                    merged.extend(left.by_ref().take(self.ncols));
                    merged.extend(right.by_ref().take(ncols));
                }
                self.cells = merged;
                self.ncols = width;
            }
        }

        let appended = match axis {
            Axis::Horizontal => other_cols,
            Axis::Vertical => other_rows,
        };
        let lines = &mut self.lines[axis.index()];
        lines.extend(appended);
        clear_trailing_margin(lines);
        renormalize(lines);
        debug_assert_eq!(self.cells.len(), self.ncols * self.nrows);
        Ok(moved)
    }
}
