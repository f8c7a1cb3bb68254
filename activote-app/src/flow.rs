use thiserror::Error;
use tracing::debug;

/// Where a voter stands in the voting flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    Unauthenticated,
    AuthenticatedNotVoted,
    /// The vote request for `candidate_id` is in flight.
    VotePending { candidate_id: u64 },
    /// `candidate_id` is `None` when the backend already reported the vote.
    Voted { candidate_id: Option<u64> },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    #[error("User ID not found. Please log in again.")]
    NotAuthenticated,
    #[error("You have already voted!")]
    AlreadyVoted,
    #[error("A vote is already being submitted.")]
    VoteInFlight,
    #[error("No vote is pending.")]
    NoPendingVote,
}

/// Voting state machine:
/// `Unauthenticated -> AuthenticatedNotVoted -> VotePending -> Voted`,
/// with `VotePending -> AuthenticatedNotVoted` when the backend rejects the vote.
#[derive(Debug, Clone)]
pub struct VotingFlow {
    state: VoteState,
}

impl Default for VotingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl VotingFlow {
    pub fn new() -> Self {
        Self { state: VoteState::Unauthenticated }
    }

    pub fn state(&self) -> VoteState {
        self.state
    }

    pub fn has_voted(&self) -> bool {
        matches!(self.state, VoteState::Voted { .. })
    }

    /// Records a successful login or a reload of the voter's status.
    /// `hasVoted` only moves forward: a voter already marked as voted stays voted.
    pub fn authenticated(&mut self, has_voted: bool) {
        self.state = match self.state {
            VoteState::Voted { candidate_id } => VoteState::Voted { candidate_id },
            VoteState::VotePending { candidate_id } if !has_voted => VoteState::VotePending { candidate_id },
            _ if has_voted => VoteState::Voted { candidate_id: None },
            _ => VoteState::AuthenticatedNotVoted,
        };
        debug!(state = ?self.state, "voting flow authenticated");
    }

    /// The voter confirmed a candidate; the request is about to be sent.
    pub fn begin(&mut self, candidate_id: u64) -> Result<(), FlowError> {
        match self.state {
            VoteState::Unauthenticated => Err(FlowError::NotAuthenticated),
            VoteState::Voted { .. } => Err(FlowError::AlreadyVoted),
            VoteState::VotePending { .. } => Err(FlowError::VoteInFlight),
            VoteState::AuthenticatedNotVoted => {
                self.state = VoteState::VotePending { candidate_id };
                Ok(())
            }
        }
    }

    /// The backend accepted the vote. Returns the candidate voted for.
    pub fn succeed(&mut self) -> Result<u64, FlowError> {
        match self.state {
            VoteState::VotePending { candidate_id } => {
                self.state = VoteState::Voted { candidate_id: Some(candidate_id) };
                Ok(candidate_id)
            }
            _ => Err(FlowError::NoPendingVote),
        }
    }

    /// The backend rejected the vote; prior state is restored.
    pub fn fail(&mut self) -> Result<(), FlowError> {
        match self.state {
            VoteState::VotePending { .. } => {
                self.state = VoteState::AuthenticatedNotVoted;
                Ok(())
            }
            _ => Err(FlowError::NoPendingVote),
        }
    }

    pub fn logout(&mut self) {
        self.state = VoteState::Unauthenticated;
    }
}
