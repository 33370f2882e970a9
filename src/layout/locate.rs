//! Placement pass: origins, visibility and enabled cascading, tab order.

use crate::geometry::{Axis, Offset, Region};
use crate::grid::{Align, CellContent, LayoutId, LayoutTree, TabOrder, WidgetId};

/// Offset of a cell inside its partition along one axis.
fn align_shift(align: Align, slack: f32) -> f32 {
    let shift = match align {
        Align::Start | Align::Justify => 0.0,
        Align::Center => (slack / 2.0).floor(),
        Align::End => slack,
    };
    shift.max(0.0)
}

impl LayoutTree {
    /// Place `id` with its top-left corner at `origin` and recurse into every
    /// nested layout, appending focusable widgets to `chain`.
    pub(crate) fn place(
        &mut self,
        id: LayoutId,
        origin: Offset,
        visible: bool,
        enabled: bool,
        chain: &mut Vec<WidgetId>,
    ) {
        let layout = &mut self.layouts[id];
        layout.frame = Region::from_parts(origin, layout.final_size);

        let mut starts: [Vec<f32>; 2] = [Vec::new(), Vec::new()];
        for axis in Axis::BOTH {
            let a = axis.index();
            let mut position = origin.get(axis) + layout.margin_before[a];
            starts[a] = layout.lines[a]
                .iter()
                .map(|line| {
                    let start = position;
                    position += line.final_size + line.effective_margin();
                    start
                })
                .collect();
        }

        let (ncols, nrows) = (layout.ncols, layout.nrows);
        let order: Vec<usize> = match layout.tab_order {
            TabOrder::RowMajor => (0..ncols * nrows).collect(),
            TabOrder::ColumnMajor => (0..ncols)
                .flat_map(|col| (0..nrows).map(move |row| row * ncols + col))
                .collect(),
        };

        for index in order {
            let layout = &mut self.layouts[id];
            let shown = layout.cell_shown(index);
            let (col, row) = layout.cell_position(index);
            let lines = [col, row];

            let cell = &mut layout.cells[index];
            let mut cell_origin = Offset::ZERO;
            for axis in Axis::BOTH {
                let a = axis.index();
                let dim = &cell.dim[a];
                let partition = layout.lines[a][lines[a]].final_size;
                let slack = partition - dim.final_size - dim.padding();
                let position = starts[a][lines[a]] + dim.padding_before + align_shift(dim.align, slack);
                cell_origin.set(axis, position);
            }
            cell.origin = cell_origin;

            let cell_visible = visible && shown && cell.visible;
            let cell_enabled = enabled && cell.enabled;
            let tabstop = cell.tabstop;
            let size = cell.final_size();
            let content = cell.content;

            match content {
                CellContent::Empty => {}
                CellContent::Widget(w) => {
                    if let Some(slot) = self.widgets.get_mut(w) {
                        slot.frame = Region::from_parts(cell_origin, size);
                        slot.visible = cell_visible;
                        slot.enabled = cell_enabled;
                        slot.control.set_frame(cell_origin, size);
                        slot.control.set_visible(cell_visible);
                        slot.control.set_enabled(cell_enabled);
                        if cell_visible && cell_enabled && tabstop && slot.control.accepts_focus() {
                            chain.push(w);
                        }
                    }
                }
                CellContent::Layout(sub) => {
                    if tabstop {
                        self.place(sub, cell_origin, cell_visible, cell_enabled, chain);
                    } else {
                        self.place(sub, cell_origin, cell_visible, cell_enabled, &mut Vec::new());
                    }
                }
            }
        }
    }

    /// Visibility and enabled state a layout inherits from the cells above it.
    pub(crate) fn inherited_flags(&self, id: LayoutId) -> (bool, bool) {
        let Some(parent) = self.layouts.get(id).and_then(|l| l.parent) else {
            return (true, true);
        };
        let (visible, enabled) = self.inherited_flags(parent);
        let layout = &self.layouts[parent];
        match layout.find_content(CellContent::Layout(id)) {
            Some(index) => {
                let cell = &layout.cells[index];
                (
                    visible && layout.cell_shown(index) && cell.visible,
                    enabled && cell.enabled,
                )
            }
            None => (visible, enabled),
        }
    }

    /// Push the cascaded state of one cell into its widget or nested layout.
    pub(crate) fn cascade_cell(&mut self, id: LayoutId, index: usize, visible: bool, enabled: bool) {
        let layout = &self.layouts[id];
        let cell = &layout.cells[index];
        let visible = visible && layout.cell_shown(index) && cell.visible;
        let enabled = enabled && cell.enabled;
        let content = cell.content;
        match content {
            CellContent::Empty => {}
            CellContent::Widget(w) => {
                if let Some(slot) = self.widgets.get_mut(w) {
                    slot.visible = visible;
                    slot.enabled = enabled;
                    slot.control.set_visible(visible);
                    slot.control.set_enabled(enabled);
                }
            }
            CellContent::Layout(sub) => {
                let count = self.layouts[sub].cells.len();
                for child in 0..count {
                    self.cascade_cell(sub, child, visible, enabled);
                }
            }
        }
    }
}
