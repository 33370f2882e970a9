//! Grid arena: slotmap-backed tree of layouts, cells and leaf widgets.

pub mod cell;
pub mod layout;
pub mod line;
pub mod tree;

pub use cell::{Align, Cell, CellContent, CellDim, LayoutId, WidgetId};
pub use layout::{Layout, TabOrder};
pub use line::LineDim;
pub use tree::LayoutTree;
