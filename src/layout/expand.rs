//! Expansion pass: negotiate a required total across the partitions of one axis.
//!
//! The difference between the required and the natural size is split by
//! resize weight. A partition that hits the size floor, or whose cells cannot
//! fit the size it was given, is blocked and the remainder is handed to the
//! partitions still free to move. The loop stops once the total matches or
//! nobody can move any more; the result is then a best-effort size.

use tracing::{debug, trace};

use crate::geometry::Axis;
use crate::grid::{LayoutId, LayoutTree};

impl LayoutTree {
    /// Resize the lines of `id` along `axis` so the layout totals `required`.
    ///
    /// Expects [`natural_pass`](Self::natural_pass) to have run for this axis.
    /// Returns the size actually achieved. Asking again for the same size
    /// before the next natural pass returns the stored result.
    pub(crate) fn expand_pass(&mut self, id: LayoutId, axis: Axis, required: f32) -> f32 {
        let a = axis.index();
        let eps = self.config.epsilon;
        let floor = self.config.min_line_size;

        let layout = &mut self.layouts[id];
        if layout.expanded[a] == Some(required) {
            return layout.final_size.get(axis);
        }
        layout.expanded[a] = None;
        let (before, after) = layout.margins(axis);
        let spacing: f32 = before
            + after
            + layout.lines[a].iter().map(|l| l.effective_margin()).sum::<f32>();
        let target = required - spacing;

        for line in layout.lines[a].iter_mut() {
            line.blocked = false;
            line.final_size = if line.displayed { line.natural } else { 0.0 };
        }
        let mut current: f32 = layout.lines[a].iter().map(|l| l.final_size).sum();
        let line_count = layout.lines[a].len();

        for iteration in 0..line_count + 2 {
            let delta = target - current;
            if delta.abs() <= eps {
                break;
            }

            let layout = &mut self.layouts[id];
            let eligible: Vec<usize> = layout.lines[a]
                .iter()
                .enumerate()
                .filter(|(_, l)| l.displayed && !l.blocked && l.weight > eps)
                .map(|(i, _)| i)
                .collect();
            let norm: f32 = eligible.iter().map(|&i| layout.lines[a][i].weight).sum();
            if eligible.is_empty() || norm <= eps {
                trace!(?axis, delta, "no resizable partitions left");
                break;
            }

            // The last eligible line takes the rounding remainder so the
            // increments add up to `delta` exactly.
            let mut increments = Vec::with_capacity(eligible.len());
            let mut assigned = 0.0_f32;
            for (k, &i) in eligible.iter().enumerate() {
                let increment = if k + 1 == eligible.len() {
                    delta - assigned
                } else {
                    (delta * layout.lines[a][i].weight / norm).round()
                };
                assigned += increment;
                increments.push((i, increment));
            }
            trace!(?axis, iteration, delta, lines = eligible.len(), "distributing");

            let mut progress = false;
            for (i, increment) in increments {
                let old = self.layouts[id].lines[a][i].final_size;
                let mut size = old + increment;
                let mut blocked = false;

                let line_floor = floor.min(old);
                if size < line_floor {
                    size = line_floor;
                    blocked = true;
                }

                let needed = self.fit_line(id, axis, i, size);
                if needed > size + eps {
                    size = needed;
                    blocked = true;
                }

                let line = &mut self.layouts[id].lines[a][i];
                line.final_size = size;
                line.blocked = blocked;
                if (size - old).abs() > eps {
                    progress = true;
                }
            }

            current = self.layouts[id].lines[a].iter().map(|l| l.final_size).sum();
            if !progress {
                break;
            }
        }

        // Every partition has its final size: refit the cells of any line
        // last fitted to something else.
        for line in 0..line_count {
            let size = self.layouts[id].lines[a][line].final_size;
            self.fit_line(id, axis, line, size);
        }

        let layout = &mut self.layouts[id];
        let total = before
            + after
            + layout.lines[a]
                .iter()
                .map(|l| l.final_size + l.effective_margin())
                .sum::<f32>();
        if (total - required).abs() > eps {
            debug!(?axis, required, achieved = total, "best-effort size");
        }
        layout.final_size.set(axis, total);
        layout.expanded[a] = Some(required);
        total
    }
}
