//! Snapshot helpers.
//!
//! Functions for turning a composed and located tree into plain-text strings
//! suitable for snapshot testing and assertions.

use std::fmt::Write;

use crate::geometry::Region;
use crate::grid::{CellContent, LayoutId, LayoutTree, WidgetId};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Describe `root` and everything nested in it, one cell per line.
///
/// Each layout prints its dimensions and frame; each cell prints its position
/// and what it holds. Widgets hidden or disabled by the last placement are
/// flagged. Nested layouts are indented under their cell.
///
/// ```ignore
/// grid 2x1 (0,0 100x30)
///   [0,0] widget (56,10 20x10)
///   [1,0] grid 1x1 (80,0 20x30)
///     [0,0] empty
/// ```
pub fn describe(tree: &LayoutTree, root: LayoutId) -> String {
    let mut out = String::new();
    if let Some(layout) = tree.layout(root) {
        let _ = writeln!(
            out,
            "grid {}x{} {}",
            layout.ncols(),
            layout.nrows(),
            region_text(layout.frame())
        );
        describe_cells(tree, root, 1, &mut out);
    }
    out.truncate(out.trim_end().len());
    out
}

/// Draw every visible widget of `root` as a block of characters.
///
/// One unit is one character. Widgets are labelled `a`, `b`, `c`... in
/// depth-first, row-major order; later widgets overwrite earlier ones where
/// frames overlap. Rows are right-trimmed and joined with `'\n'`.
pub fn frames_to_string(tree: &LayoutTree, root: LayoutId) -> String {
    let Some(layout) = tree.layout(root) else {
        return String::new();
    };
    let frame = layout.frame();
    let w = frame.width.ceil().max(0.0) as usize;
    let h = frame.height.ceil().max(0.0) as usize;
    if w == 0 || h == 0 {
        return String::new();
    }

    let mut grid: Vec<Vec<char>> = vec![vec![' '; w]; h];
    let mut widgets = Vec::new();
    collect_widgets(tree, root, &mut widgets);

    for (n, id) in widgets.into_iter().enumerate() {
        if tree.widget_visible(id) != Some(true) {
            continue;
        }
        let Some(region) = tree.widget_frame(id) else {
            continue;
        };
        let label = label_for(n);
        let x0 = (region.x - frame.x).max(0.0) as usize;
        let y0 = (region.y - frame.y).max(0.0) as usize;
        let x1 = ((region.right() - frame.x).max(0.0) as usize).min(w);
        let y1 = ((region.bottom() - frame.y).max(0.0) as usize).min(h);
        for row in grid.iter_mut().take(y1).skip(y0) {
            for ch in row.iter_mut().take(x1).skip(x0) {
                *ch = label;
            }
        }
    }

    let lines: Vec<String> = grid
        .into_iter()
        .map(|row| {
            let s: String = row.into_iter().collect();
            s.trim_end().to_owned()
        })
        .collect();
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn region_text(region: Region) -> String {
    format!("({},{} {}x{})", region.x, region.y, region.width, region.height)
}

fn label_for(n: usize) -> char {
    const LABELS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    LABELS[n % LABELS.len()] as char
}

fn describe_cells(tree: &LayoutTree, id: LayoutId, depth: usize, out: &mut String) {
    let Some(layout) = tree.layout(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    for row in 0..layout.nrows() {
        for col in 0..layout.ncols() {
            let Ok(cell) = layout.cell(col, row) else {
                continue;
            };
            let _ = write!(out, "{indent}[{col},{row}] ");
            match cell.content() {
                CellContent::Empty => {
                    let _ = writeln!(out, "empty");
                }
                CellContent::Widget(w) => {
                    let frame = tree.widget_frame(w).unwrap_or(Region::EMPTY);
                    let _ = write!(out, "widget {}", region_text(frame));
                    if tree.widget_visible(w) == Some(false) {
                        out.push_str(" hidden");
                    }
                    if tree.widget_enabled(w) == Some(false) {
                        out.push_str(" disabled");
                    }
                    out.push('\n');
                }
                CellContent::Layout(sub) => {
                    if let Some(nested) = tree.layout(sub) {
                        let _ = writeln!(
                            out,
                            "grid {}x{} {}",
                            nested.ncols(),
                            nested.nrows(),
                            region_text(nested.frame())
                        );
                    }
                    describe_cells(tree, sub, depth + 1, out);
                }
            }
        }
    }
}

fn collect_widgets(tree: &LayoutTree, id: LayoutId, out: &mut Vec<WidgetId>) {
    let Some(layout) = tree.layout(id) else {
        return;
    };
    for cell in layout.cells() {
        match cell.content() {
            CellContent::Empty => {}
            CellContent::Widget(w) => out.push(w),
            CellContent::Layout(sub) => collect_widgets(tree, sub, out),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
