use crate::types::VenueAddress;

/// Lifecycle of a listing attempt
///
/// `Failed` behaves like `Idle` for starting a new attempt; it only keeps the
/// last error around for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(VenueAddress),
    Failed {
        message: String,
    },
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Whether a new attempt may start from this state
    pub fn accepts_submission(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed { .. })
    }

    pub fn venue(&self) -> Option<&VenueAddress> {
        match self {
            SubmissionState::Succeeded(venue) => Some(venue),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Idle/Failed -> Submitting; returns false from any other state
    pub(crate) fn begin(&mut self) -> bool {
        if !self.accepts_submission() {
            return false;
        }
        *self = SubmissionState::Submitting;
        true
    }

    /// Submitting -> Succeeded/Failed; ignored from any other state
    pub(crate) fn finish(&mut self, outcome: Result<VenueAddress, String>) -> bool {
        if !self.is_submitting() {
            return false;
        }
        *self = match outcome {
            Ok(venue) => SubmissionState::Succeeded(venue),
            Err(message) => SubmissionState::Failed { message },
        };
        true
    }

    /// Follow a change of token pair. A pair that already has a market goes
    /// straight to `Succeeded`; any other pair starts from `Idle`. An in-flight
    /// attempt is kept.
    pub(crate) fn reset_for_pair(&mut self, listed: Option<&VenueAddress>) {
        if self.is_submitting() {
            return;
        }
        *self = match listed {
            Some(venue) => SubmissionState::Succeeded(venue.clone()),
            None => SubmissionState::Idle,
        };
    }
}
