use serde::Serialize;
use std::fmt;

/// Lifecycle of one load.
///
/// `Idle → Opening → Scanning → Assembling → Published`, or `Failed` from
/// any of the middle three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    #[default]
    Idle,
    Opening,
    Scanning,
    Assembling,
    Published,
    Failed,
}

impl LoadPhase {
    pub fn is_in_progress(self) -> bool {
        matches!(self, Self::Opening | Self::Scanning | Self::Assembling)
    }
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Opening => "opening",
            Self::Scanning => "scanning",
            Self::Assembling => "assembling",
            Self::Published => "published",
            Self::Failed => "failed",
        })
    }
}

/// One progress notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub phase: LoadPhase,
    /// Completion in `[0, 1]`, never decreasing within a load
    pub fraction: f64,
    pub message: String,
}

pub(crate) const OPENING: f64 = 0.05;
const SCAN_SPAN: f64 = 0.85;
pub(crate) const ASSEMBLING_CHANNELS: f64 = 0.92;
pub(crate) const ASSEMBLING_SERVERS: f64 = 0.95;
pub(crate) const DONE: f64 = 1.0;

/// Fraction after `processed` of `total` entries have been scanned.
pub(crate) fn scan_fraction(processed: usize, total: usize) -> f64 {
    if total == 0 {
        return OPENING + SCAN_SPAN;
    }
    OPENING + SCAN_SPAN * (processed as f64 / total as f64)
}

/// Forwards progress to a listener, clamping it so it never goes backwards.
pub(crate) struct ProgressReporter<P> {
    listener: P,
    last: f64,
}

impl<P: FnMut(&Progress)> ProgressReporter<P> {
    pub fn new(listener: P) -> Self {
        Self { listener, last: 0.0 }
    }

    pub fn report(&mut self, phase: LoadPhase, fraction: f64, message: impl Into<String>) {
        self.last = fraction.clamp(self.last, 1.0);
        (self.listener)(&Progress {
            phase,
            fraction: self.last,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_fraction_spans_opening_to_assembly() {
        assert_eq!(scan_fraction(0, 10), OPENING);
        assert!((scan_fraction(10, 10) - 0.90).abs() < 1e-9);
        assert!((scan_fraction(0, 0) - 0.90).abs() < 1e-9);
        assert!(scan_fraction(10, 10) < ASSEMBLING_CHANNELS);
    }

    #[test]
    fn reporter_is_monotonic() {
        let mut seen = Vec::new();
        {
            let mut reporter = ProgressReporter::new(|p: &Progress| seen.push(p.fraction));
            reporter.report(LoadPhase::Opening, 0.05, "Opening archive…");
            reporter.report(LoadPhase::Scanning, 0.02, "late");
            reporter.report(LoadPhase::Assembling, 0.92, "Assembling channels…");
            reporter.report(LoadPhase::Published, 1.5, "Done!");
        }
        assert_eq!(seen, [0.05, 0.05, 0.92, 1.0]);
    }

    #[test]
    fn phase_labels() {
        assert_eq!(LoadPhase::Assembling.to_string(), "assembling");
        assert!(LoadPhase::Scanning.is_in_progress());
        assert!(!LoadPhase::Published.is_in_progress());
    }
}
