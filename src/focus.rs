//! Keyboard focus over the tab sequence of a located layout.
//!
//! [`FocusChain`] follows the focused widget by id through the tab sequence
//! of one root layout, stepping forward (Tab) or backward (Shift+Tab).

use tracing::debug;

use crate::grid::{LayoutId, LayoutTree, WidgetId};

/// Tab navigation over the widgets a `locate` found focusable.
///
/// Focus is held by widget id, so rebuilding after a structural edit keeps
/// it wherever the widget moved. Rebuild after every `locate`.
#[derive(Debug, Default)]
pub struct FocusChain {
    order: Vec<WidgetId>,
    focused: Option<WidgetId>,
}

impl FocusChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain over the current tab sequence of `root`, nothing focused.
    pub fn for_layout(tree: &LayoutTree, root: LayoutId) -> Self {
        Self {
            order: tree.tab_sequence(root).to_vec(),
            focused: None,
        }
    }

    /// Refresh the order from the tab sequence of `root`.
    ///
    /// A focused widget that dropped out of the sequence (hidden, disabled
    /// or detached) loses focus.
    pub fn rebuild(&mut self, tree: &LayoutTree, root: LayoutId) {
        self.order.clear();
        self.order.extend_from_slice(tree.tab_sequence(root));
        if let Some(id) = self.focused {
            if !self.order.contains(&id) {
                debug!(?id, "focused widget left the tab sequence");
                self.focused = None;
            }
        }
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Tab: focus the widget after the focused one, wrapping at the end.
    /// With nothing focused, the first widget takes focus.
    pub fn focus_next(&mut self) -> Option<WidgetId> {
        self.step(1)
    }

    /// Shift+Tab: focus the widget before the focused one, wrapping at the
    /// start. With nothing focused, the last widget takes focus.
    pub fn focus_previous(&mut self) -> Option<WidgetId> {
        self.step(-1)
    }

    fn step(&mut self, by: isize) -> Option<WidgetId> {
        let len = self.order.len() as isize;
        if len == 0 {
            return None;
        }
        let at = match self.focused.and_then(|id| self.position(id)) {
            Some(pos) => (pos as isize + by).rem_euclid(len),
            None if by > 0 => 0,
            None => len - 1,
        };
        self.focused = self.order.get(at as usize).copied();
        self.focused
    }

    /// Give focus to `id`. Widgets outside the sequence are refused and the
    /// current focus stays put.
    pub fn focus(&mut self, id: WidgetId) -> bool {
        let known = self.order.contains(&id);
        if known {
            self.focused = Some(id);
        }
        known
    }

    /// Drop focus, returning the widget that had it.
    pub fn blur(&mut self) -> Option<WidgetId> {
        self.focused.take()
    }

    /// Index of `id` in the tab sequence.
    pub fn position(&self, id: WidgetId) -> Option<usize> {
        self.order.iter().position(|&w| w == id)
    }

    pub fn widgets(&self) -> &[WidgetId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
