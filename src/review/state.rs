// Moderation state machine.
//
// Neutral and Warning are display states; Resolved is terminal. There is
// no transition from Warning back to Neutral — once a submission is
// flagged it either resolves through the review workflow or stays in
// Warning until the user acts.

use serde::{Deserialize, Serialize};

/// How a flagged submission was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// The user confirmed removal and the removal service acknowledged it.
    Confirmed,
    /// The user rejected removal; the content stays up.
    Rejected,
}

impl Resolution {
    /// The fixed explanatory notice shown to the user for this outcome.
    pub fn notice(&self) -> &'static str {
        match self {
            Resolution::Confirmed => {
                "You have confirmed the removal of this content. It will be removed \
                 immediately from YouthVibe. Thank you for helping us maintain a safe \
                 environment."
            }
            Resolution::Rejected => {
                "You have chosen to reject the removal of this content. It will remain \
                 visible unless reported by another user as cyberbullying."
            }
        }
    }
}

/// Where a submission stands after (and during) analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModerationState {
    /// Below the warning threshold; terminal for unflagged submissions.
    Neutral,
    /// At or above the threshold; awaiting a confirm/reject decision.
    Warning,
    /// The review reached an outcome.
    Resolved(Resolution),
}

impl ModerationState {
    /// Decide the post-analysis state from the aggregate percentage.
    pub fn from_signal(max_pct: u8, threshold: u8) -> Self {
        if max_pct >= threshold {
            ModerationState::Warning
        } else {
            ModerationState::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationState::Neutral => "Neutral",
            ModerationState::Warning => "Warning",
            ModerationState::Resolved(Resolution::Confirmed) => "Resolved (confirmed)",
            ModerationState::Resolved(Resolution::Rejected) => "Resolved (rejected)",
        }
    }

    /// True while the submission is waiting on a confirm/reject action.
    pub fn awaiting_review(&self) -> bool {
        matches!(self, ModerationState::Warning)
    }
}

impl std::fmt::Display for ModerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_is_neutral() {
        assert_eq!(ModerationState::from_signal(84, 85), ModerationState::Neutral);
        assert_eq!(ModerationState::from_signal(0, 85), ModerationState::Neutral);
    }

    #[test]
    fn at_and_above_threshold_is_warning() {
        assert_eq!(ModerationState::from_signal(85, 85), ModerationState::Warning);
        assert_eq!(ModerationState::from_signal(100, 85), ModerationState::Warning);
    }

    #[test]
    fn zero_threshold_flags_everything() {
        assert_eq!(ModerationState::from_signal(0, 0), ModerationState::Warning);
    }

    #[test]
    fn display_matches_as_str() {
        for state in [
            ModerationState::Neutral,
            ModerationState::Warning,
            ModerationState::Resolved(Resolution::Confirmed),
            ModerationState::Resolved(Resolution::Rejected),
        ] {
            assert_eq!(state.to_string(), state.as_str());
        }
    }
}
