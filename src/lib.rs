//! # gilt-grid
//!
//! A grid-based auto-layout engine for GUI toolkits.
//!
//! Widgets are placed in the cells of rectangular grids, grids nest inside
//! cells of other grids, and the engine computes every widget's frame from
//! what the widgets need (their natural size) and what the window offers
//! (the required size), spreading surplus or deficit over rows and columns
//! by resize weight.
//!
//! ## Core Systems
//!
//! - **[`grid`]**: cells, partitions, layouts and the slotmap-backed [`LayoutTree`]
//! - **[`layout`]**: the solver passes: natural size, expansion, placement
//! - **[`widget`]**: the [`Control`] trait a backend implements for its widgets
//! - **[`focus`]**: tab navigation over the placed widgets
//! - **[`config`]**: solver tuning
//! - **[`geometry`]**: Axis, Offset, Size, Region primitives
//! - **[`testing`]**: probe controls and snapshot helpers
//!
//! ## Example
//!
//! ```
//! use gilt_grid::testing::probe::Fixed;
//! use gilt_grid::{Axis, LayoutTree, Size};
//!
//! let mut tree = LayoutTree::new();
//! let root = tree.create_layout(2, 1).unwrap();
//! tree.attach_widget(root, 0, 0, Fixed::new(50.0, 20.0)).unwrap();
//! tree.attach_widget(root, 1, 0, Fixed::new(30.0, 20.0)).unwrap();
//! tree.layout_mut(root).unwrap().set_expand(Axis::Horizontal, 1).unwrap();
//!
//! let size = tree.compose(root, Some(Size::new(120.0, 20.0))).unwrap();
//! tree.locate(root).unwrap();
//! assert_eq!(size, Size::new(120.0, 20.0));
//! ```

// Foundation
pub mod config;
pub mod error;
pub mod geometry;

// Core systems
pub mod grid;
pub mod layout;

// Widget integration
pub mod focus;
pub mod widget;

// Test support
pub mod testing;

pub use config::LayoutConfig;
pub use error::{GridError, Result};
pub use focus::FocusChain;
pub use geometry::{Axis, Offset, Region, Size};
pub use grid::{Align, CellContent, LayoutId, LayoutTree, TabOrder, WidgetId};
pub use widget::Control;
