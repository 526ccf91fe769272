use crate::foundation::error::{KindredError, KindredResult};

/// Boolean gate serializing generation requests.
///
/// There is no network-level cancellation: a second request while one is in
/// flight is simply refused at the controller level, and the gate reopens
/// when the caller reports completion (success or failure alike).
#[derive(Debug, Default)]
pub struct RequestGate {
    in_flight: bool,
}

impl RequestGate {
    /// Open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate for a new request.
    pub fn begin(&mut self) -> KindredResult<()> {
        if self.in_flight {
            return Err(KindredError::validation(
                "a generation request is already in flight",
            ));
        }
        self.in_flight = true;
        Ok(())
    }

    /// Release the gate after the request settled.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    /// Whether a request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }
}

/// Client-side, time-based progress display for an in-flight request.
///
/// This is an estimate, not ground truth: the collaborator enforces no
/// timeout and reports nothing until it pushes an explicit progress or
/// state message. The fraction therefore saturates just below completion
/// and only an authoritative report should ever show 100%.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressEstimate {
    started: f64,
    expected_secs: f64,
}

/// Ceiling for the estimated fraction.
const ESTIMATE_CAP: f64 = 0.95;

impl ProgressEstimate {
    /// Estimate for a request started at `now`, expected to take
    /// `expected_secs`.
    pub fn new(now: f64, expected_secs: f64) -> Self {
        Self {
            started: now,
            expected_secs: expected_secs.max(f64::EPSILON),
        }
    }

    /// Estimated completion fraction at `now`, in `[0, 0.95]`.
    pub fn fraction(&self, now: f64) -> f64 {
        ((now - self.started) / self.expected_secs).clamp(0.0, ESTIMATE_CAP)
    }

    /// Estimated completion percentage at `now`.
    pub fn percent(&self, now: f64) -> f64 {
        self.fraction(now) * 100.0
    }
}
