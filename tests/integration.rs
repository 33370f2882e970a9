//! Integration tests for gilt-grid.
//!
//! These tests exercise the public API from outside the crate: building
//! trees, composing, locating and reading the results back.

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use gilt_grid::testing::probe::{Fixed, Wrap};
use gilt_grid::testing::{describe, frames_to_string};
use gilt_grid::{
    Align, Axis, Control, FocusChain, GridError, LayoutConfig, LayoutId, LayoutTree, Offset,
    Region, Size, TabOrder,
};
use pretty_assertions::assert_eq;

fn column_sizes(tree: &LayoutTree, id: LayoutId) -> Vec<f32> {
    tree.layout(id)
        .unwrap()
        .lines(Axis::Horizontal)
        .iter()
        .map(|l| l.final_size())
        .collect()
}

/// A small dialog: two labels, a text field and a nested button row.
fn dialog() -> (LayoutTree, LayoutId, LayoutId) {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(2, 2).unwrap();
    let buttons = tree.create_layout(2, 1).unwrap();

    tree.attach_widget(root, 0, 0, Fixed::new(10.0, 2.0)).unwrap();
    tree.attach_widget(root, 1, 0, Fixed::focusable(20.0, 2.0).stretching())
        .unwrap();
    tree.attach_widget(root, 0, 1, Fixed::new(8.0, 2.0)).unwrap();
    tree.attach_widget(buttons, 0, 0, Fixed::focusable(5.0, 2.0)).unwrap();
    tree.attach_widget(buttons, 1, 0, Fixed::focusable(5.0, 2.0)).unwrap();
    tree.attach_layout(root, 1, 1, buttons).unwrap();

    tree.cell_mut(root, 1, 0).unwrap().set_halign(Align::Justify);
    let layout = tree.layout_mut(root).unwrap();
    layout.set_margin(1.0).unwrap();
    layout.set_line_margin(Axis::Horizontal, 0, 2.0).unwrap();
    layout.set_line_margin(Axis::Vertical, 0, 1.0).unwrap();
    layout.set_expand(Axis::Horizontal, 1).unwrap();
    layout.set_expand(Axis::Vertical, 1).unwrap();
    (tree, root, buttons)
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[test]
fn zero_weight_column_keeps_its_natural_width() {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(2, 1).unwrap();
    let left = tree.attach_widget(root, 0, 0, Fixed::new(50.0, 20.0)).unwrap();
    let right = tree.attach_widget(root, 1, 0, Fixed::new(30.0, 20.0)).unwrap();
    tree.layout_mut(root).unwrap().set_expand(Axis::Horizontal, 1).unwrap();

    let size = tree.compose(root, Some(Size::new(120.0, 20.0))).unwrap();
    tree.locate(root).unwrap();

    assert_eq!(size, Size::new(120.0, 20.0));
    assert_eq!(column_sizes(&tree, root), vec![50.0, 70.0]);
    assert_eq!(tree.widget_frame(left), Some(Region::new(0.0, 0.0, 50.0, 20.0)));
    // Start-aligned: the widget keeps 30 and sits at the start of its column.
    assert_eq!(tree.widget_frame(right), Some(Region::new(50.0, 0.0, 30.0, 20.0)));
}

#[test]
fn forced_cell_sets_the_line_and_justified_cells_follow() {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(1, 3).unwrap();
    tree.attach_widget(root, 0, 0, Fixed::new(80.0, 10.0)).unwrap();
    tree.attach_widget(root, 0, 1, Fixed::new(80.0, 10.0)).unwrap();
    tree.attach_widget(root, 0, 2, Fixed::new(80.0, 10.0)).unwrap();
    tree.cell_mut(root, 0, 0).unwrap().set_forced_size(Axis::Horizontal, 200.0).unwrap();
    tree.cell_mut(root, 0, 2).unwrap().set_halign(Align::Justify);

    let size = tree.compose(root, None).unwrap();
    let layout = tree.layout(root).unwrap();
    assert_eq!(size.width, 200.0);
    assert_eq!(layout.line_final_size(Axis::Horizontal, 0).unwrap(), 200.0);
    assert_eq!(layout.cell_final_size(0, 0).unwrap().width, 200.0);
    assert_eq!(layout.cell_final_size(0, 1).unwrap().width, 80.0);
    assert_eq!(layout.cell_final_size(0, 2).unwrap().width, 200.0);
}

#[test]
fn removing_the_only_weighted_column_renormalizes() {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(3, 1).unwrap();
    for col in 0..3 {
        tree.attach_widget(root, col, 0, Fixed::new(10.0, 10.0)).unwrap();
    }
    tree.layout_mut(root).unwrap().set_expand(Axis::Horizontal, 2).unwrap();
    tree.remove_column(root, 2).unwrap();

    let layout = tree.layout(root).unwrap();
    assert_eq!(layout.ncols(), 2);
    assert!((layout.weight_sum(Axis::Horizontal) - 1.0).abs() < 1e-4);

    tree.compose(root, Some(Size::new(50.0, 10.0))).unwrap();
    let sizes = column_sizes(&tree, root);
    assert_eq!(sizes.iter().sum::<f32>(), 50.0);
}

// ---------------------------------------------------------------------------
// Full tree
// ---------------------------------------------------------------------------

#[test]
fn dialog_describe_snapshot() {
    let (mut tree, root, _) = dialog();
    let size = tree.compose(root, Some(Size::new(40.0, 8.0))).unwrap();
    tree.locate(root).unwrap();
    assert_eq!(size, Size::new(40.0, 8.0));

    insta::assert_snapshot!(describe(&tree, root), @r"
    grid 2x2 (0,0 40x8)
      [0,0] widget (1,1 10x2)
      [1,0] widget (13,1 26x2)
      [0,1] widget (1,4 8x2)
      [1,1] grid 2x1 (13,4 26x3)
        [0,0] widget (13,4 5x2)
        [1,0] widget (26,4 5x2)
    ");
}

#[test]
fn dialog_frames_drawn() {
    let (mut tree, root, _) = dialog();
    tree.compose(root, Some(Size::new(40.0, 8.0))).unwrap();
    tree.locate(root).unwrap();

    let expected = [
        "",
        " aaaaaaaaaa  bbbbbbbbbbbbbbbbbbbbbbbbbb",
        " aaaaaaaaaa  bbbbbbbbbbbbbbbbbbbbbbbbbb",
        "",
        " cccccccc    ddddd        eeeee",
        " cccccccc    ddddd        eeeee",
        "",
        "",
    ]
    .join("\n");
    assert_eq!(frames_to_string(&tree, root), expected);
}

#[test]
fn dialog_tab_sequence_and_focus() {
    let (mut tree, root, buttons) = dialog();
    tree.compose(root, None).unwrap();
    tree.locate(root).unwrap();

    let field = tree.cell(root, 1, 0).unwrap().content();
    let ok = tree.cell(buttons, 0, 0).unwrap().content();
    let cancel = tree.cell(buttons, 1, 0).unwrap().content();
    let ids: Vec<_> = tree
        .tab_sequence(root)
        .iter()
        .map(|&w| gilt_grid::CellContent::Widget(w))
        .collect();
    assert_eq!(ids, vec![field, ok, cancel]);

    let mut focus = FocusChain::new();
    focus.rebuild(&tree, root);
    let first = focus.focus_next().unwrap();
    assert_eq!(tree.widget_cell(first), Some((root, 1, 0)));
    let last = focus.focus_previous().unwrap();
    assert_eq!(tree.widget_cell(last), Some((buttons, 1, 0)));
}

#[test]
fn compose_is_idempotent() {
    let (mut tree, root, _) = dialog();
    tree.compose(root, Some(Size::new(55.0, 13.0))).unwrap();
    tree.locate(root).unwrap();
    let first = describe(&tree, root);

    tree.compose(root, Some(Size::new(55.0, 13.0))).unwrap();
    tree.locate(root).unwrap();
    assert_eq!(describe(&tree, root), first);
}

#[test]
fn margins_add_up_to_the_composed_total() {
    let (mut tree, root, _) = dialog();
    let size = tree.compose(root, Some(Size::new(61.0, 17.0))).unwrap();
    let layout = tree.layout(root).unwrap();
    for axis in Axis::BOTH {
        let (before, after) = layout.margins(axis);
        let lines: f32 = layout
            .lines(axis)
            .iter()
            .map(|l| l.final_size() + l.margin_after())
            .sum();
        assert_eq!(before + lines + after, size.get(axis));
    }
}

// ---------------------------------------------------------------------------
// State cascading
// ---------------------------------------------------------------------------

#[test]
fn hidden_column_takes_no_space_and_hides_its_widgets() {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(3, 1).unwrap();
    let a = tree.attach_widget(root, 0, 0, Fixed::new(10.0, 5.0)).unwrap();
    let b = tree.attach_widget(root, 1, 0, Fixed::new(10.0, 5.0)).unwrap();
    let c = tree.attach_widget(root, 2, 0, Fixed::new(10.0, 5.0)).unwrap();
    tree.layout_mut(root).unwrap().set_line_displayed(Axis::Horizontal, 1, false).unwrap();

    let size = tree.compose(root, None).unwrap();
    tree.locate(root).unwrap();

    assert_eq!(size.width, 20.0);
    assert_eq!(tree.widget_visible(a), Some(true));
    assert_eq!(tree.widget_visible(b), Some(false));
    assert_eq!(tree.control::<Fixed>(b).unwrap().visible, Some(false));
    assert_eq!(tree.widget_frame(c).unwrap().x, 10.0);
}

#[test]
fn disabled_nested_cell_disables_the_subtree() {
    let (mut tree, root, buttons) = dialog();
    tree.set_cell_enabled(root, 1, 1, false).unwrap();
    tree.compose(root, None).unwrap();
    tree.locate(root).unwrap();

    for col in 0..2 {
        let gilt_grid::CellContent::Widget(w) = tree.cell(buttons, col, 0).unwrap().content() else {
            panic!("button cell should hold a widget");
        };
        assert_eq!(tree.widget_enabled(w), Some(false));
        assert_eq!(tree.control::<Fixed>(w).unwrap().enabled, Some(false));
    }
    assert_eq!(tree.tab_sequence(root).len(), 1);
}

#[test]
fn column_major_tab_order() {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(2, 2).unwrap();
    let mut ids = Vec::new();
    for row in 0..2 {
        for col in 0..2 {
            ids.push(tree.attach_widget(root, col, row, Fixed::focusable(4.0, 4.0)).unwrap());
        }
    }
    tree.layout_mut(root).unwrap().set_tab_order(TabOrder::ColumnMajor);
    tree.compose(root, None).unwrap();
    tree.locate(root).unwrap();
    assert_eq!(tree.tab_sequence(root), &[ids[0], ids[2], ids[1], ids[3]]);
}

// ---------------------------------------------------------------------------
// Structural edits and recomposition
// ---------------------------------------------------------------------------

#[test]
fn appended_rows_are_laid_out_below() {
    let mut tree = LayoutTree::new();
    let top = tree.create_layout(1, 1).unwrap();
    let bottom = tree.create_layout(1, 1).unwrap();
    tree.attach_widget(top, 0, 0, Fixed::new(10.0, 4.0)).unwrap();
    let moved = tree.attach_widget(bottom, 0, 0, Fixed::new(10.0, 6.0)).unwrap();

    tree.append_rows(top, bottom).unwrap();
    let size = tree.compose(top, None).unwrap();
    tree.locate(top).unwrap();

    assert_eq!(size, Size::new(10.0, 10.0));
    assert_eq!(tree.widget_frame(moved), Some(Region::new(0.0, 4.0, 10.0, 6.0)));
    let weights = tree.layout(top).unwrap().weight_sum(Axis::Vertical);
    assert!((weights - 1.0).abs() < 1e-4);
}

#[test]
fn update_after_inserting_a_row() {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(1, 1).unwrap();
    tree.attach_widget(root, 0, 0, Fixed::new(10.0, 10.0)).unwrap();
    tree.compose(root, None).unwrap();
    tree.locate(root).unwrap();

    tree.insert_row(root, 1).unwrap();
    let added = tree.attach_widget(root, 0, 1, Fixed::new(10.0, 5.0)).unwrap();
    assert_eq!(tree.update(root).unwrap(), Size::new(10.0, 15.0));
    assert_eq!(tree.widget_frame(added).unwrap().y, 10.0);
}

#[test]
fn under_space_is_best_effort() {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(2, 1).unwrap();
    tree.attach_widget(root, 0, 0, Fixed::new(40.0, 10.0)).unwrap();
    tree.attach_widget(root, 1, 0, Fixed::new(40.0, 10.0)).unwrap();

    let size = tree.compose(root, Some(Size::new(4.0, 10.0))).unwrap();
    assert_eq!(size.width, 10.0);
    assert_eq!(column_sizes(&tree, root), vec![5.0, 5.0]);
}

#[test]
fn shrunk_widgets_stay_inside_their_columns() {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(2, 1).unwrap();
    let left = tree.attach_widget(root, 0, 0, Fixed::new(40.0, 10.0)).unwrap();
    let right = tree.attach_widget(root, 1, 0, Fixed::new(40.0, 10.0)).unwrap();

    let size = tree.compose(root, Some(Size::new(50.0, 10.0))).unwrap();
    tree.locate(root).unwrap();

    assert_eq!(size, Size::new(50.0, 10.0));
    assert_eq!(column_sizes(&tree, root), vec![25.0, 25.0]);
    assert_eq!(tree.layout(root).unwrap().cell_final_size(0, 0).unwrap().width, 25.0);
    assert_eq!(tree.widget_frame(left), Some(Region::new(0.0, 0.0, 25.0, 10.0)));
    assert_eq!(tree.widget_frame(right), Some(Region::new(25.0, 0.0, 25.0, 10.0)));
}

#[test]
fn removing_the_dominant_column_keeps_small_weights_in_proportion() {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(3, 1).unwrap();
    tree.layout_mut(root)
        .unwrap()
        .set_line_weights(Axis::Horizontal, &[0.995, 0.004, 0.001])
        .unwrap();
    tree.remove_column(root, 0).unwrap();

    let weights: Vec<f32> = tree
        .layout(root)
        .unwrap()
        .lines(Axis::Horizontal)
        .iter()
        .map(|l| l.weight())
        .collect();
    assert!((weights[0] - 0.8).abs() < 1e-4, "{weights:?}");
    assert!((weights[1] - 0.2).abs() < 1e-4, "{weights:?}");
}

#[test]
fn configured_floor_allows_deeper_shrink() {
    let mut tree = LayoutTree::with_config(LayoutConfig::default().with_min_line_size(0.0));
    let root = tree.create_layout(2, 1).unwrap();
    tree.attach_widget(root, 0, 0, Fixed::new(40.0, 10.0)).unwrap();
    tree.attach_widget(root, 1, 0, Fixed::new(40.0, 10.0)).unwrap();

    let size = tree.compose(root, Some(Size::new(4.0, 10.0))).unwrap();
    assert_eq!(size.width, 4.0);
    assert_eq!(column_sizes(&tree, root), vec![2.0, 2.0]);
}

#[test]
fn wrapped_text_gets_taller_when_narrowed() {
    let mut tree = LayoutTree::new();
    let root = tree.create_layout(1, 1).unwrap();
    let text = tree.attach_widget(root, 0, 0, Wrap::new(90.0, 10.0)).unwrap();
    tree.cell_mut(root, 0, 0).unwrap().set_halign(Align::Justify);
    tree.cell_mut(root, 0, 0).unwrap().set_valign(Align::Justify);

    // Natural height with 30-wide lines is 30, so the row grows past the
    // request of 20.
    let size = tree.compose(root, Some(Size::new(30.0, 20.0))).unwrap();
    assert_eq!(size, Size::new(30.0, 30.0));
    assert_eq!(tree.control::<Wrap>(text).unwrap().last_cross, Some(30.0));
}

#[test]
fn contract_violations_are_errors() {
    let mut tree = LayoutTree::new();
    assert!(matches!(tree.create_layout(3, 0), Err(GridError::ZeroSizeGrid { .. })));

    let root = tree.create_layout(2, 2).unwrap();
    assert!(matches!(
        tree.cell_mut(root, 2, 0),
        Err(GridError::CellOutOfBounds { .. })
    ));
    assert!(matches!(
        tree.cell_mut(root, 0, 0).unwrap().set_padding(Axis::Vertical, -1.0, 0.0),
        Err(GridError::NegativeSize { .. })
    ));
    assert!(matches!(
        tree.layout_mut(root).unwrap().set_line_weights(Axis::Horizontal, &[1.0]),
        Err(GridError::AxisMismatch { .. })
    ));
}

// ---------------------------------------------------------------------------
// Deep nesting
// ---------------------------------------------------------------------------

/// Fixed-size widget that counts every sizing query it receives.
struct Counted {
    size: f32,
    calls: Rc<Cell<usize>>,
}

impl Control for Counted {
    fn natural_size(&mut self, _axis: Axis, _cross: Option<f32>) -> f32 {
        self.calls.set(self.calls.get() + 1);
        self.size
    }

    fn expand(&mut self, _axis: Axis, natural: f32, _required: f32) -> f32 {
        self.calls.set(self.calls.get() + 1);
        natural
    }

    fn set_frame(&mut self, _origin: Offset, _size: Size) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn deep_nesting_composes_in_linear_work() {
    const DEPTH: usize = 24;
    let calls = Rc::new(Cell::new(0));
    let counted = || Counted { size: 10.0, calls: Rc::clone(&calls) };

    let mut tree = LayoutTree::new();
    let root = tree.create_layout(2, 1).unwrap();
    let mut parent = root;
    for _ in 0..DEPTH {
        tree.attach_widget(parent, 1, 0, counted()).unwrap();
        let sub = tree.create_layout(2, 1).unwrap();
        tree.attach_layout(parent, 0, 0, sub).unwrap();
        parent = sub;
    }
    tree.attach_widget(parent, 0, 0, counted()).unwrap();
    tree.attach_widget(parent, 1, 0, counted()).unwrap();

    let size = tree.compose(root, Some(Size::new(1000.0, 500.0))).unwrap();
    assert_eq!(size, Size::new(1000.0, 500.0));

    // Each widget is asked a handful of times per axis, however deep it sits.
    let widgets = DEPTH + 2;
    assert!(calls.get() <= 16 * widgets, "{} sizing calls", calls.get());

    calls.set(0);
    tree.update(root).unwrap();
    assert!(calls.get() <= 16 * widgets, "{} sizing calls on update", calls.get());
}
