use activote_common::{
    models::{
        candidate::{max_votes, total_votes},
        statistics::percentage,
    },
    utils::resolve_candidate_image,
    Candidate,
};

use crate::flow::FlowError;

/// One display row of the candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub id: u64,
    pub name: String,
    pub party: String,
    pub image: String,
    pub vote_count: u64,
    /// Share of all votes, one decimal; a bare `"0"` before anyone has voted.
    pub share: String,
    pub ratio: f64,
    /// Holds the highest count (ties included), only once someone has votes.
    pub leading: bool,
}

pub fn rows(candidates: &[Candidate]) -> Vec<CandidateRow> {
    let total = total_votes(candidates);
    let max = max_votes(candidates);
    candidates
        .iter()
        .map(|c| CandidateRow {
            id: c.id,
            name: c.name.clone(),
            party: c.party.clone(),
            image: resolve_candidate_image(c.image_url.as_deref()),
            vote_count: c.vote_count,
            share: if total == 0 { "0".to_string() } else { percentage(c.vote_count, total, 1) },
            ratio: if total == 0 { 0.0 } else { c.vote_count as f64 / total as f64 },
            leading: max > 0 && c.vote_count == max,
        })
        .collect()
}

/// Selection and confirmation-dialog state of the candidate list.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    selected: Option<Candidate>,
    notice: Option<String>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the confirmation dialog for `candidate`. Voters who already voted
    /// get a notice instead.
    pub fn select(&mut self, candidate: &Candidate, has_voted: bool) -> Result<(), FlowError> {
        if has_voted {
            self.selected = None;
            self.notice = Some(FlowError::AlreadyVoted.to_string());
            return Err(FlowError::AlreadyVoted);
        }
        self.notice = None;
        self.selected = Some(candidate.clone());
        Ok(())
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.selected.as_ref()
    }

    /// Text of the confirmation dialog while a candidate is selected.
    pub fn confirmation_prompt(&self) -> Option<String> {
        self.selected
            .as_ref()
            .map(|c| format!("Are you sure you want to vote for {}?", c.name))
    }

    /// Closes the dialog and hands back the chosen candidate id.
    pub fn confirm(&mut self) -> Option<u64> {
        self.selected.take().map(|c| c.id)
    }

    pub fn cancel(&mut self) {
        self.selected = None;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
