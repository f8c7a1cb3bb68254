use activote_common::VotingStatistics;

/// Turnout figures shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsCard {
    pub voted_voters: u64,
    pub total_voters: u64,
    pub percentage_voted: String,
}

impl From<&VotingStatistics> for StatisticsCard {
    fn from(stats: &VotingStatistics) -> Self {
        Self {
            voted_voters: stats.voted_voters,
            total_voters: stats.total_voters,
            percentage_voted: stats.percentage_voted(),
        }
    }
}

impl StatisticsCard {
    /// Progress in `0.0..=1.0` for the turnout bar.
    pub fn progress(&self) -> f64 {
        self.percentage_voted
            .parse::<f64>()
            .map(|p| (p / 100.0).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }
}
