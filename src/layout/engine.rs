//! Composition driver: runs the solver passes over a layout tree.
//!
//! [`LayoutTree::compose`] resolves sizes axis by axis (natural width, expand
//! width, natural height, expand height) so heights can depend on resolved
//! widths. [`LayoutTree::locate`] then turns sizes into frames.

use tracing::debug;

use crate::error::{check_size, Result};
use crate::geometry::{Axis, Offset, Size};
use crate::grid::{LayoutId, LayoutTree, WidgetId};

impl LayoutTree {
    /// Resolve the sizes of `root` and everything nested in it.
    ///
    /// With `None` the layout takes its natural size. With a required size
    /// the partitions negotiate to fill it; when that is impossible the
    /// returned size is the best effort and may differ from the request.
    pub fn compose(&mut self, root: LayoutId, required: Option<Size>) -> Result<Size> {
        self.get(root)?;
        if let Some(size) = required {
            check_size(size.width)?;
            check_size(size.height)?;
        }

        let mut achieved = Size::ZERO;
        for axis in Axis::BOTH {
            let natural = self.natural_pass(root, axis);
            let wanted = required.map_or(natural, |size| size.get(axis));
            let total = self.expand_pass(root, axis, wanted);
            debug!(?root, ?axis, natural, wanted, total, "composed axis");
            achieved.set(axis, total);
        }

        self.layouts[root].required = required;
        Ok(achieved)
    }

    /// Natural size of `root`: shorthand for `compose(root, None)`.
    pub fn natural_size(&mut self, root: LayoutId) -> Result<Size> {
        self.compose(root, None)
    }

    /// Place `root` at the origin. Call after [`compose`](Self::compose).
    pub fn locate(&mut self, root: LayoutId) -> Result<()> {
        self.locate_at(root, Offset::ZERO)
    }

    /// Place `root` with its top-left corner at `origin`, apply frames,
    /// visibility and enabled state to every widget, and rebuild the tab
    /// sequence of `root`.
    pub fn locate_at(&mut self, root: LayoutId, origin: Offset) -> Result<()> {
        self.get(root)?;
        let (visible, enabled) = self.inherited_flags(root);
        let mut chain = Vec::new();
        self.place(root, origin, visible, enabled, &mut chain);
        debug!(?root, focusable = chain.len(), "located");
        self.layouts[root].tab_chain = chain;
        Ok(())
    }

    /// Recompose with the size requested last time and place again at the
    /// same origin.
    pub fn update(&mut self, root: LayoutId) -> Result<Size> {
        let layout = self.get(root)?;
        let required = layout.required;
        let origin = layout.frame.offset();
        let size = self.compose(root, required)?;
        self.locate_at(root, origin)?;
        Ok(size)
    }

    /// Focusable widgets of `root` in tab order, as of the last `locate`.
    pub fn tab_sequence(&self, root: LayoutId) -> &[WidgetId] {
        self.layouts
            .get(root)
            .map(|layout| layout.tab_chain.as_slice())
            .unwrap_or(&[])
    }
}
