//! Natural-size pass: bottom-up intrinsic sizes of cells, lines and layouts.
//!
//! Each line takes the largest padded natural size of its cells, then runs a
//! fixed point so that justified and forced cells fit: whenever one of them
//! needs more than the line target, the target grows and the line is fitted
//! again.

use tracing::trace;

use crate::geometry::Axis;
use crate::grid::{Align, CellContent, LayoutId, LayoutTree};

impl LayoutTree {
    /// Compute the natural size of `id` along `axis`, caching it on every
    /// cell, line and nested layout.
    pub(crate) fn natural_pass(&mut self, id: LayoutId, axis: Axis) -> f32 {
        let a = axis.index();
        let eps = self.config.epsilon;

        let layout = &mut self.layouts[id];
        layout.expanded[a] = None;
        for line in layout.lines[a].iter_mut() {
            line.fitted = None;
        }

        let cell_count = self.layouts[id].cells.len();
        for index in 0..cell_count {
            let natural = self.content_natural(id, index, axis);
            let dim = &mut self.layouts[id].cells[index].dim[a];
            dim.content_natural = natural;
            dim.natural = natural;
        }

        let line_count = self.layouts[id].line_count(axis);
        for line in 0..line_count {
            let layout = &self.layouts[id];
            if !layout.lines[a][line].displayed {
                self.fit_line(id, axis, line, 0.0);
                let dim = &mut self.layouts[id].lines[a][line];
                dim.natural = 0.0;
                dim.final_size = 0.0;
                continue;
            }

            let mut target = layout
                .line_cells(axis, line)
                .filter(|&index| layout.cell_shown(index))
                .map(|index| {
                    let dim = &layout.cells[index].dim[a];
                    dim.content_natural + dim.padding()
                })
                .fold(0.0_f32, f32::max);
            target = target.max(layout.lines[a][line].forced);

            let cap = layout.nrows.max(layout.ncols) + 1;
            let mut settled = false;
            for _ in 0..cap {
                let needed = self.fit_line(id, axis, line, target);
                if needed <= target + eps {
                    settled = true;
                    break;
                }
                trace!(?axis, line, from = target, to = needed, "line target raised");
                target = needed;
            }
            if !settled {
                // Iteration cap hit: leave every cell fitted to the last target.
                self.fit_line(id, axis, line, target);
            }

            let layout = &mut self.layouts[id];
            let dim = &mut layout.lines[a][line];
            dim.natural = target;
            dim.final_size = target;
            let members: Vec<usize> = layout.line_cells(axis, line).collect();
            for index in members {
                let dim = &mut layout.cells[index].dim[a];
                dim.natural = dim.final_size;
            }
        }

        let layout = &mut self.layouts[id];
        let (before, after) = layout.margins(axis);
        let lines: f32 = layout.lines[a]
            .iter()
            .map(|l| l.natural + l.effective_margin())
            .sum();
        let total = before + lines + after;
        layout.natural[a] = total;
        total
    }

    /// Intrinsic size of one cell's content, zero when the cell takes no space.
    fn content_natural(&mut self, id: LayoutId, index: usize, axis: Axis) -> f32 {
        let layout = &self.layouts[id];
        if !layout.cell_shown(index) {
            return 0.0;
        }
        let cell = &layout.cells[index];
        let content = cell.content;
        let cross = match axis {
            Axis::Horizontal => None,
            Axis::Vertical => Some(cell.dim[Axis::Horizontal.index()].final_size),
        };
        match content {
            CellContent::Empty => 0.0,
            CellContent::Widget(w) => {
                match self.widgets.get_mut(w) {
                    Some(slot) => slot.control.natural_size(axis, cross).max(0.0),
                    None => 0.0,
                }
            }
            CellContent::Layout(sub) => self.natural_pass(sub, axis),
        }
    }

    /// Fit every cell of a line into a partition of `size`.
    ///
    /// Returns the size the line actually needs: `size`, or more when a
    /// justified or forced cell cannot be made to fit. A line already fitted
    /// to `size` is left alone.
    pub(crate) fn fit_line(&mut self, id: LayoutId, axis: Axis, line: usize, size: f32) -> f32 {
        let a = axis.index();
        let eps = self.config.epsilon;
        if let Some((last, needed)) = self.layouts[id].lines[a][line].fitted {
            if last == size {
                return needed;
            }
        }

        let members: Vec<usize> = self.layouts[id].line_cells(axis, line).collect();
        let mut required = size;
        for index in members {
            let fitted = self.fit_cell(id, index, axis, size);
            let layout = &self.layouts[id];
            if !layout.cell_shown(index) {
                continue;
            }
            let dim = &layout.cells[index].dim[a];
            let rigid = dim.forced > 0.0 || dim.align == Align::Justify;
            let needed = fitted + dim.padding();
            if rigid && needed > required + eps {
                required = needed;
            }
        }
        self.layouts[id].lines[a][line].fitted = Some((size, required));
        required
    }

    /// Size one cell inside a partition of `line_size` and store its final
    /// size. Returns that size, paddings excluded.
    fn fit_cell(&mut self, id: LayoutId, index: usize, axis: Axis, line_size: f32) -> f32 {
        let a = axis.index();
        let layout = &self.layouts[id];
        if !layout.cell_shown(index) {
            self.layouts[id].cells[index].dim[a].final_size = 0.0;
            return 0.0;
        }

        let cell = &layout.cells[index];
        let content = cell.content;
        let dim = cell.dim[a];
        let inner = (line_size - dim.padding()).max(0.0);

        let size = if dim.forced > 0.0 {
            self.resize_content(content, axis, dim.content_natural, dim.forced);
            dim.forced
        } else if dim.align == Align::Justify {
            self.resize_content(content, axis, dim.content_natural, inner)
                .max(inner)
        } else {
            let target = dim.content_natural.min(inner);
            self.resize_content(content, axis, dim.content_natural, target)
                .min(inner)
        };

        self.layouts[id].cells[index].dim[a].final_size = size;
        size
    }

    /// Ask the content to take `required` along `axis`; returns what it took.
    fn resize_content(&mut self, content: CellContent, axis: Axis, natural: f32, required: f32) -> f32 {
        match content {
            CellContent::Empty => required,
            CellContent::Widget(w) => match self.widgets.get_mut(w) {
                Some(slot) => slot.control.expand(axis, natural, required).max(0.0),
                None => required,
            },
            CellContent::Layout(sub) => self.expand_pass(sub, axis, required),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Axis;
    use crate::grid::{Align, LayoutTree};
    use crate::testing::probe::{Fixed, Wrap};

    #[test]
    fn line_takes_largest_padded_cell() {
        let mut tree = LayoutTree::new();
        let root = tree.create_layout(1, 2).unwrap();
        tree.attach_widget(root, 0, 0, Fixed::new(40.0, 10.0)).unwrap();
        tree.attach_widget(root, 0, 1, Fixed::new(30.0, 10.0)).unwrap();
        tree.cell_mut(root, 0, 1).unwrap().set_padding(Axis::Horizontal, 8.0, 4.0).unwrap();

        let width = tree.natural_pass(root, Axis::Horizontal);
        assert_eq!(width, 42.0);
        let layout = tree.layout(root).unwrap();
        assert_eq!(layout.line(Axis::Horizontal, 0).unwrap().natural_size(), 42.0);
        assert_eq!(layout.cell(0, 0).unwrap().dim(Axis::Horizontal).natural_size(), 40.0);
    }

    #[test]
    fn total_includes_margins() {
        let mut tree = LayoutTree::new();
        let root = tree.create_layout(3, 1).unwrap();
        for col in 0..3 {
            tree.attach_widget(root, col, 0, Fixed::new(10.0, 4.0)).unwrap();
        }
        let layout = tree.layout_mut(root).unwrap();
        layout.set_line_margin(Axis::Horizontal, 0, 2.0).unwrap();
        layout.set_line_margin(Axis::Horizontal, 1, 3.0).unwrap();
        layout.set_margin2(1.0, 5.0).unwrap();

        assert_eq!(tree.natural_pass(root, Axis::Horizontal), 5.0 + 30.0 + 5.0 + 5.0);
        assert_eq!(tree.natural_pass(root, Axis::Vertical), 1.0 + 4.0 + 1.0);
    }

    #[test]
    fn forced_line_is_a_floor() {
        let mut tree = LayoutTree::new();
        let root = tree.create_layout(2, 1).unwrap();
        tree.attach_widget(root, 0, 0, Fixed::new(40.0, 10.0)).unwrap();
        tree.attach_widget(root, 1, 0, Fixed::new(40.0, 10.0)).unwrap();
        let layout = tree.layout_mut(root).unwrap();
        layout.set_line_forced_size(Axis::Horizontal, 0, 60.0).unwrap();
        layout.set_line_forced_size(Axis::Horizontal, 1, 20.0).unwrap();

        assert_eq!(tree.natural_pass(root, Axis::Horizontal), 100.0);
    }

    #[test]
    fn forced_cell_raises_line_and_justified_cells_follow() {
        let mut tree = LayoutTree::new();
        let root = tree.create_layout(1, 3).unwrap();
        tree.attach_widget(root, 0, 0, Fixed::new(80.0, 10.0)).unwrap();
        tree.attach_widget(root, 0, 1, Fixed::new(20.0, 10.0)).unwrap();
        tree.attach_widget(root, 0, 2, Fixed::new(80.0, 10.0)).unwrap();
        tree.cell_mut(root, 0, 0).unwrap().set_halign(Align::Justify);
        tree.cell_mut(root, 0, 1).unwrap().set_forced_size(Axis::Horizontal, 200.0).unwrap();

        assert_eq!(tree.natural_pass(root, Axis::Horizontal), 200.0);
        let layout = tree.layout(root).unwrap();
        assert_eq!(layout.cell(0, 0).unwrap().dim(Axis::Horizontal).final_size(), 200.0);
        assert_eq!(layout.cell(0, 1).unwrap().dim(Axis::Horizontal).final_size(), 200.0);
        // Start-aligned cells keep their own width.
        assert_eq!(layout.cell(0, 2).unwrap().dim(Axis::Horizontal).final_size(), 80.0);
    }

    #[test]
    fn hidden_cells_and_lines_take_no_space() {
        let mut tree = LayoutTree::new();
        let root = tree.create_layout(2, 2).unwrap();
        tree.attach_widget(root, 0, 0, Fixed::new(10.0, 10.0)).unwrap();
        tree.attach_widget(root, 1, 0, Fixed::new(20.0, 10.0)).unwrap();
        tree.attach_widget(root, 0, 1, Fixed::new(90.0, 30.0)).unwrap();
        tree.cell_mut(root, 0, 1).unwrap().set_displayed(false);
        tree.layout_mut(root).unwrap().set_line_displayed(Axis::Horizontal, 1, false).unwrap();

        assert_eq!(tree.natural_pass(root, Axis::Horizontal), 10.0);
        assert_eq!(tree.natural_pass(root, Axis::Vertical), 10.0);
    }

    #[test]
    fn nested_layout_reports_its_natural_size() {
        let mut tree = LayoutTree::new();
        let root = tree.create_layout(2, 1).unwrap();
        let sub = tree.create_layout(1, 2).unwrap();
        tree.attach_widget(sub, 0, 0, Fixed::new(15.0, 5.0)).unwrap();
        tree.attach_widget(sub, 0, 1, Fixed::new(25.0, 5.0)).unwrap();
        tree.layout_mut(sub).unwrap().set_margin(2.0).unwrap();
        tree.attach_layout(root, 0, 0, sub).unwrap();
        tree.attach_widget(root, 1, 0, Fixed::new(10.0, 40.0)).unwrap();

        assert_eq!(tree.natural_pass(root, Axis::Horizontal), 29.0 + 10.0);
        assert_eq!(tree.layout(sub).unwrap().natural_size().width, 29.0);
    }

    #[test]
    fn vertical_query_sees_resolved_width() {
        let mut tree = LayoutTree::new();
        let root = tree.create_layout(1, 1).unwrap();
        let w = tree.attach_widget(root, 0, 0, Wrap::new(100.0, 10.0)).unwrap();
        tree.cell_mut(root, 0, 0).unwrap().set_halign(Align::Justify);

        tree.natural_pass(root, Axis::Horizontal);
        tree.expand_pass(root, Axis::Horizontal, 40.0);
        // 100 units of text in 40-wide lines wraps to three lines.
        assert_eq!(tree.natural_pass(root, Axis::Vertical), 30.0);
        assert_eq!(tree.control::<Wrap>(w).unwrap().last_cross, Some(40.0));
    }
}
