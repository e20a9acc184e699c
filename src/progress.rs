//! Progress side channel for long passes (edge scans, name scan, scoring).
//!
//! Reporting never feeds back into results; a [`NoProgress`] run and a [`LogProgress`] run
//! produce identical output.

use log::info;

pub trait Progress {
    /// A new pass begins. `total` is the expected item count, when known.
    fn start(&mut self, label: &str, total: Option<usize>);
    fn advance(&mut self, items: usize);
    fn finish(&mut self);
}

/// Discards all reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&mut self, _label: &str, _total: Option<usize>) {}
    fn advance(&mut self, _items: usize) {}
    fn finish(&mut self) {}
}

/// Logs pass boundaries and percentage milestones at `info`.
///
/// Without a known total, a line is logged every `every` items instead.
#[derive(Debug, Clone)]
pub struct LogProgress {
    label: String,
    total: Option<usize>,
    done: usize,
    next_mark: usize,
    every: usize,
    step_pct: usize,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::with_step(10, 1_000_000)
    }

    /// `step_pct`: milestone spacing in percent. `every`: item spacing when the total is unknown.
    pub fn with_step(step_pct: usize, every: usize) -> Self {
        Self {
            label: String::new(),
            total: None,
            done: 0,
            next_mark: 0,
            every: every.max(1),
            step_pct: step_pct.clamp(1, 100),
        }
    }

    pub fn items_done(&self) -> usize {
        self.done
    }

    fn mark_for(&self, pct: usize) -> usize {
        match self.total {
            Some(t) => (t.saturating_mul(pct) / 100).max(1),
            None => self.every.saturating_mul(pct / self.step_pct),
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for LogProgress {
    fn start(&mut self, label: &str, total: Option<usize>) {
        self.label = label.to_string();
        self.total = total;
        self.done = 0;
        self.next_mark = self.mark_for(self.step_pct);
        match total {
            Some(t) => info!("{}: starting ({} items)", self.label, t),
            None => info!("{}: starting", self.label),
        }
    }

    fn advance(&mut self, items: usize) {
        self.done += items;
        while self.done >= self.next_mark {
            match self.total {
                Some(t) if t > 0 => {
                    let pct = (self.done.min(t) * 100) / t;
                    info!("{}: {}% ({}/{})", self.label, pct, self.done, t);
                    if self.next_mark >= t {
                        self.next_mark = usize::MAX;
                        break;
                    }
                    self.next_mark = (self.next_mark + (t * self.step_pct / 100).max(1)).min(t);
                }
                _ => {
                    info!("{}: {} items", self.label, self.done);
                    self.next_mark = self.next_mark.saturating_add(self.every);
                }
            }
        }
    }

    fn finish(&mut self) {
        info!("{}: done ({} items)", self.label, self.done);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_progress_counts_items_across_milestones() {
        let mut p = LogProgress::with_step(25, 10);
        p.start("links", Some(8));
        for _ in 0..8 {
            p.advance(1);
        }
        p.finish();
        assert_eq!(p.items_done(), 8);

        p.start("unknown total", None);
        p.advance(35);
        assert_eq!(p.items_done(), 35);
    }

    #[test]
    fn empty_total_does_not_loop() {
        let mut p = LogProgress::new();
        p.start("nothing", Some(0));
        p.advance(0);
        p.finish();
        assert_eq!(p.items_done(), 0);
    }
}
