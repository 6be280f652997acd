//! Point awards and leaderboard entries.

use super::user::Alias;

/// Points awarded for submitting a report.
pub const REPORT_SUBMITTED_POINTS: u64 = 5;
/// Points awarded to a report's author per confirmation.
pub const CONFIRMATION_RECEIVED_POINTS: u64 = 3;

/// Events that credit points to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringEvent {
    ReportSubmitted,
    ConfirmationReceived,
}

impl ScoringEvent {
    /// Points credited for this event.
    pub const fn points(self) -> u64 {
        match self {
            Self::ReportSubmitted => REPORT_SUBMITTED_POINTS,
            Self::ConfirmationReceived => CONFIRMATION_RECEIVED_POINTS,
        }
    }
}

/// Expected balance for a user, given what they authored and what their
/// reports received. Reports deleted later keep their credited points.
pub const fn expected_points(reports_submitted: u64, confirmations_received: u64) -> u64 {
    REPORT_SUBMITTED_POINTS
        .saturating_mul(reports_submitted)
        .saturating_add(CONFIRMATION_RECEIVED_POINTS.saturating_mul(confirmations_received))
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub alias: Alias,
    pub points: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ScoringEvent::ReportSubmitted, 5)]
    #[case(ScoringEvent::ConfirmationReceived, 3)]
    fn events_award_fixed_points(#[case] event: ScoringEvent, #[case] expected: u64) {
        assert_eq!(event.points(), expected);
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(1, 0, 5)]
    #[case(1, 2, 11)]
    #[case(3, 4, 27)]
    fn expected_points_combines_events(
        #[case] reports: u64,
        #[case] confirmations: u64,
        #[case] expected: u64,
    ) {
        assert_eq!(expected_points(reports, confirmations), expected);
    }
}
