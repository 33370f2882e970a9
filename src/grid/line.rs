//! Partition state shared by every cell of one row or column, and resize
//! weight bookkeeping.

/// Sizing state of one row or one column.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDim {
    pub(crate) displayed: bool,
    pub(crate) forced: f32,
    pub(crate) weight: f32,
    pub(crate) margin_after: f32,
    pub(crate) natural: f32,
    pub(crate) final_size: f32,
    /// Excluded from further negotiation. Only meaningful during an expansion pass.
    pub(crate) blocked: bool,
    /// Size the cells were last fitted to, and what that fit required.
    /// Cleared by the natural pass.
    pub(crate) fitted: Option<(f32, f32)>,
}

impl LineDim {
    /// A displayed partition with the given resize weight and everything else zero.
    pub(crate) fn new(weight: f32) -> Self {
        Self {
            displayed: true,
            forced: 0.0,
            weight,
            margin_after: 0.0,
            natural: 0.0,
            final_size: 0.0,
            blocked: false,
            fitted: None,
        }
    }

    pub fn displayed(&self) -> bool {
        self.displayed
    }

    /// Forced size, or `0.0` when the cells decide.
    pub fn forced_size(&self) -> f32 {
        self.forced
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn margin_after(&self) -> f32 {
        self.margin_after
    }

    pub fn natural_size(&self) -> f32 {
        self.natural
    }

    pub fn final_size(&self) -> f32 {
        self.final_size
    }

    /// Whether the last expansion pass stopped resizing this partition.
    pub fn blocked(&self) -> bool {
        self.blocked
    }

    /// Margin that actually separates this partition from the next one.
    /// Hidden partitions take no space at all.
    pub(crate) fn effective_margin(&self) -> f32 {
        if self.displayed {
            self.margin_after
        } else {
            0.0
        }
    }
}

/// Partitions for a fresh axis of `count` lines: weight `1/count` each, the
/// last one taking whatever rounding left so the total is exactly one.
pub(crate) fn initial_lines(count: usize) -> Vec<LineDim> {
    debug_assert!(count > 0);
    let share = 1.0 / count as f32;
    let mut lines: Vec<LineDim> = (0..count).map(|_| LineDim::new(share)).collect();
    let others = share * (count - 1) as f32;
    if let Some(last) = lines.last_mut() {
        last.weight = 1.0 - others;
    }
    lines
}

/// Sum of the resize weights.
pub(crate) fn weight_sum(lines: &[LineDim]) -> f32 {
    lines.iter().map(|l| l.weight).sum()
}

/// Scale weights so they add up to one.
///
/// Proportions between nonzero weights are kept. When every weight is zero,
/// the last partition receives all of it.
pub(crate) fn renormalize(lines: &mut [LineDim]) {
    let total = weight_sum(lines);
    if total <= f32::EPSILON {
        for line in lines.iter_mut() {
            line.weight = 0.0;
        }
        if let Some(last) = lines.last_mut() {
            last.weight = 1.0;
        }
        return;
    }

    for line in lines.iter_mut() {
        line.weight /= total;
    }

    // Push the float residue onto the last weighted partition.
    let residue = 1.0 - weight_sum(lines);
    if let Some(last) = lines.iter_mut().rev().find(|l| l.weight > 0.0) {
        last.weight = (last.weight + residue).max(0.0);
    }
}

/// Clear the margin of the last partition.
pub(crate) fn clear_trailing_margin(lines: &mut [LineDim]) {
    if let Some(last) = lines.last_mut() {
        last.margin_after = 0.0;
    }
}
