use std::collections::HashMap;

use activote_common::{models::candidate::total_votes, Candidate};

/// Slice colors, assigned by candidate position and cycled.
pub const PALETTE: [&str; 5] = ["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF"];

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub name: String,
    pub value: u64,
    pub color: &'static str,
    pub ratio: f64,
}

/// Input of the vote distribution (pie) chart.
#[derive(Debug, Clone, PartialEq)]
pub enum VoteDistribution {
    /// Every candidate has zero votes.
    NoVotes,
    Slices(Vec<Slice>),
}

pub fn vote_distribution(candidates: &[Candidate]) -> VoteDistribution {
    let total = total_votes(candidates);
    if total == 0 {
        return VoteDistribution::NoVotes;
    }
    VoteDistribution::Slices(
        candidates
            .iter()
            .enumerate()
            .map(|(i, c)| Slice {
                name: c.name.clone(),
                value: c.vote_count,
                color: PALETTE[i % PALETTE.len()],
                ratio: c.vote_count as f64 / total as f64,
            })
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotePoint {
    pub name: String,
    /// Count currently displayed, including local optimistic updates.
    pub current: u64,
    /// Count from the last server snapshot.
    pub previous: u64,
}

/// Input of the candidate votes (line) chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateVotesChart {
    NoData,
    Series(Vec<VotePoint>),
}

/// `baseline` maps candidate id to the last fetched count; candidates missing
/// from it use their current count.
pub fn candidate_votes(candidates: &[Candidate], baseline: &HashMap<u64, u64>) -> CandidateVotesChart {
    if candidates.is_empty() {
        return CandidateVotesChart::NoData;
    }
    CandidateVotesChart::Series(
        candidates
            .iter()
            .map(|c| VotePoint {
                name: c.name.clone(),
                current: c.vote_count,
                previous: baseline.get(&c.id).copied().unwrap_or(c.vote_count),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(counts: &[u64]) -> Vec<Candidate> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &votes)| Candidate {
                id: i as u64 + 1,
                name: format!("Candidate {}", i + 1),
                party: String::new(),
                image_url: None,
                vote_count: votes,
            })
            .collect()
    }

    #[test]
    fn test_all_zero_is_no_votes() {
        assert_eq!(vote_distribution(&candidates(&[0, 0, 0])), VoteDistribution::NoVotes);
        assert_eq!(vote_distribution(&[]), VoteDistribution::NoVotes);
    }

    #[test]
    fn test_slices_cycle_palette() {
        let slate = candidates(&[1, 1, 1, 1, 1, 5]);
        let VoteDistribution::Slices(slices) = vote_distribution(&slate) else {
            panic!("expected slices");
        };
        assert_eq!(slices[0].color, "#FF6384");
        assert_eq!(slices[4].color, "#9966FF");
        assert_eq!(slices[5].color, "#FF6384");
        assert!((slices[5].ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_candidate_votes_against_baseline() {
        let mut slate = candidates(&[5, 3]);
        let baseline: HashMap<u64, u64> = slate.iter().map(|c| (c.id, c.vote_count)).collect();
        slate[1].vote_count += 1;

        let CandidateVotesChart::Series(points) = candidate_votes(&slate, &baseline) else {
            panic!("expected series");
        };
        assert_eq!(points[0], VotePoint { name: "Candidate 1".into(), current: 5, previous: 5 });
        assert_eq!(points[1], VotePoint { name: "Candidate 2".into(), current: 4, previous: 3 });

        assert_eq!(candidate_votes(&[], &baseline), CandidateVotesChart::NoData);
    }
}
