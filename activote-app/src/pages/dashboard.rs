use std::{collections::HashMap, sync::Arc, time::Duration};

use activote_client::{ClientError, LedgerBus, LedgerEvent, SessionContext, VotingApi};
use activote_common::{Candidate, VoteRequest, VotingStatistics};
use thiserror::Error;
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{error, info, warn};

use crate::{
    components::{
        candidate_list::{self, CandidateList, CandidateRow},
        charts::{self, CandidateVotesChart, VoteDistribution},
        BlockchainViewer, StatisticsCard,
    },
    flow::{FlowError, VotingFlow},
    pages::{
        ledger::{spawn_ledger_refresher, SharedLedger},
        PageLoad,
    },
    routes::Route,
};

pub const DASHBOARD_LOAD_FAILED: &str = "Failed to load dashboard data.";
pub const VOTE_SUCCESS: &str = "Vote successfully cast!";
pub const VOTE_FAILED: &str = "Failed to cast vote. Please try again.";

/// Why a vote action did not go through.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoteError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error("Candidate {0} is not on the ballot.")]
    UnknownCandidate(u64),
    #[error("Select a candidate first.")]
    NothingSelected,
    /// The backend refused the vote or could not be reached.
    #[error("{0}")]
    Rejected(String),
}

/// Statistics and candidates merged for display, plus the server counts the
/// candidates had when they were fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub statistics: VotingStatistics,
    pub candidates: Vec<Candidate>,
    baseline: HashMap<u64, u64>,
}

impl DashboardData {
    pub fn new(statistics: VotingStatistics, candidates: Vec<Candidate>) -> Self {
        let baseline = candidates.iter().map(|c| (c.id, c.vote_count)).collect();
        Self { statistics, candidates, baseline }
    }

    pub fn statistics_card(&self) -> StatisticsCard {
        StatisticsCard::from(&self.statistics)
    }

    pub fn percentage_voted(&self) -> String {
        self.statistics.percentage_voted()
    }

    pub fn distribution(&self) -> VoteDistribution {
        charts::vote_distribution(&self.candidates)
    }

    pub fn votes_chart(&self) -> CandidateVotesChart {
        charts::candidate_votes(&self.candidates, &self.baseline)
    }

    pub fn rows(&self) -> Vec<CandidateRow> {
        candidate_list::rows(&self.candidates)
    }

    pub fn has_voted(&self) -> bool {
        self.statistics.has_voted
    }

    pub fn candidate(&self, candidate_id: u64) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == candidate_id)
    }

    /// Local patch after the backend accepted a vote: one more vote for
    /// `candidate_id` and the voter marked as voted. Other candidates are
    /// untouched. Returns false when the candidate is not listed.
    pub fn apply_vote(&mut self, candidate_id: u64) -> bool {
        self.statistics.has_voted = true;
        match self.candidates.iter_mut().find(|c| c.id == candidate_id) {
            Some(candidate) => {
                candidate.vote_count += 1;
                true
            }
            None => false,
        }
    }
}

/// The protected dashboard: turnout, candidates, charts and the ledger view,
/// with voting from the candidate list.
pub struct DashboardPage {
    api: Arc<dyn VotingApi>,
    session: SessionContext,
    bus: LedgerBus,
    settle: Duration,
    data: Option<DashboardData>,
    ledger: SharedLedger,
    error: Option<String>,
    message: Option<String>,
    flow: VotingFlow,
    candidate_list: CandidateList,
    refresher: Option<JoinHandle<()>>,
}

impl DashboardPage {
    pub fn new(api: Arc<dyn VotingApi>, session: SessionContext, bus: LedgerBus, settle: Duration) -> Self {
        Self {
            api,
            session,
            bus,
            settle,
            data: None,
            ledger: Arc::new(RwLock::new(BlockchainViewer::default())),
            error: None,
            message: None,
            flow: VotingFlow::new(),
            candidate_list: CandidateList::new(),
            refresher: None,
        }
    }

    pub fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    /// Handle on the ledger view; the background refresher writes to it.
    pub fn ledger(&self) -> SharedLedger {
        Arc::clone(&self.ledger)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last vote outcome shown to the voter.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn flow(&self) -> &VotingFlow {
        &self.flow
    }

    pub fn candidate_list(&self) -> &CandidateList {
        &self.candidate_list
    }

    /// Fetches statistics, the ledger and candidates concurrently. Any failure
    /// replaces the page with one error message.
    pub async fn load(&mut self) -> PageLoad {
        let Ok(session) = self.session.require() else {
            return PageLoad::Redirect(Route::Entry);
        };

        let api = Arc::clone(&self.api);
        let fetched = tokio::try_join!(
            api.get_statistics(session.user_id),
            api.get_blockchain(),
            api.get_candidates(),
        );

        match fetched {
            Ok((statistics, blocks, candidates)) => {
                info!(
                    "Dashboard loaded: {} candidates, {} blocks",
                    candidates.len(),
                    blocks.len()
                );
                self.flow.authenticated(statistics.has_voted);
                self.ledger.write().await.replace(blocks);
                self.data = Some(DashboardData::new(statistics, candidates));
                self.error = None;
                self.ensure_refresher();
                PageLoad::Ready
            }
            Err(ClientError::MissingSession) => PageLoad::Redirect(Route::Entry),
            Err(e) => {
                error!("Error fetching dashboard data: {}", e);
                self.data = None;
                self.error = Some(DASHBOARD_LOAD_FAILED.to_string());
                PageLoad::Failed(DASHBOARD_LOAD_FAILED.to_string())
            }
        }
    }

    fn ensure_refresher(&mut self) {
        if self.refresher.as_ref().is_some_and(|h| !h.is_finished()) {
            return;
        }
        self.refresher = Some(spawn_ledger_refresher(
            Arc::clone(&self.api),
            self.bus.clone(),
            Arc::clone(&self.ledger),
            self.settle,
        ));
    }

    fn already_voted(&self) -> bool {
        self.flow.has_voted() || self.data.as_ref().is_some_and(DashboardData::has_voted)
    }

    /// Opens the confirmation dialog and returns its text.
    pub fn select(&mut self, candidate_id: u64) -> Result<String, VoteError> {
        let candidate = self
            .data
            .as_ref()
            .and_then(|d| d.candidate(candidate_id))
            .cloned()
            .ok_or(VoteError::UnknownCandidate(candidate_id))?;
        let has_voted = self.already_voted();
        self.candidate_list.select(&candidate, has_voted)?;
        self.candidate_list
            .confirmation_prompt()
            .ok_or(VoteError::NothingSelected)
    }

    pub fn cancel(&mut self) {
        self.candidate_list.cancel();
    }

    /// Confirms the open dialog and casts the vote.
    pub async fn confirm(&mut self) -> Result<String, VoteError> {
        let candidate_id = self.candidate_list.confirm().ok_or(VoteError::NothingSelected)?;
        self.cast_vote(candidate_id).await
    }

    /// Sends the vote. Local state changes only after the backend accepts it;
    /// a rejection leaves counts and `hasVoted` as they were.
    pub async fn cast_vote(&mut self, candidate_id: u64) -> Result<String, VoteError> {
        let session = self
            .session
            .require()
            .map_err(|_| VoteError::Flow(FlowError::NotAuthenticated))?;
        if self.data.as_ref().is_some_and(|d| d.candidate(candidate_id).is_none()) {
            return Err(VoteError::UnknownCandidate(candidate_id));
        }
        if self.data.as_ref().is_some_and(DashboardData::has_voted) {
            self.flow.authenticated(true);
        }
        self.flow.begin(candidate_id)?;

        let request = VoteRequest { voter_id: session.user_id, candidate_id };
        match self.api.cast_vote(&request).await {
            Ok(receipt) => {
                self.flow.succeed()?;
                if let Some(data) = self.data.as_mut() {
                    if !data.apply_vote(candidate_id) {
                        warn!("Voted for candidate {} missing from the local list", candidate_id);
                    }
                }
                info!("Vote accepted for candidate {}: {}", candidate_id, receipt.message);
                self.bus.publish(LedgerEvent::VoteRecorded { voter_id: session.user_id, candidate_id });
                self.message = Some(VOTE_SUCCESS.to_string());
                Ok(VOTE_SUCCESS.to_string())
            }
            Err(e) => {
                self.flow.fail()?;
                error!("Vote error: {}", e);
                let message = e.server_message().unwrap_or_else(|| VOTE_FAILED.to_string());
                self.message = Some(message.clone());
                Err(VoteError::Rejected(message))
            }
        }
    }
}

impl Drop for DashboardPage {
    fn drop(&mut self) {
        if let Some(handle) = self.refresher.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use activote_client::Session;
    use activote_common::{
        Block, LoginRequest, LoginResponse, ProfileForm, SignupReceipt, VoteReceipt, Voter,
    };
    use async_trait::async_trait;

    use super::*;

    /// Backend double: fixed slate, optional vote rejection, counts calls.
    #[derive(Default)]
    struct MockApi {
        reject_votes: bool,
        fail_candidates: bool,
        has_voted: bool,
        votes: Mutex<Vec<VoteRequest>>,
    }

    fn candidate(id: u64, name: &str, votes: u64) -> Candidate {
        Candidate { id, name: name.into(), party: "P".into(), image_url: None, vote_count: votes }
    }

    #[async_trait]
    impl VotingApi for MockApi {
        async fn login(&self, _: &LoginRequest) -> Result<LoginResponse, ClientError> {
            unimplemented!()
        }
        async fn signup(&self, _: &ProfileForm) -> Result<SignupReceipt, ClientError> {
            unimplemented!()
        }
        async fn get_voter(&self, _: u64) -> Result<Voter, ClientError> {
            unimplemented!()
        }
        async fn get_statistics(&self, _: u64) -> Result<VotingStatistics, ClientError> {
            Ok(VotingStatistics {
                voted_voters: 1,
                total_voters: 4,
                has_voted: self.has_voted,
                username: "alice".into(),
                user_image: None,
            })
        }
        async fn get_candidates(&self) -> Result<Vec<Candidate>, ClientError> {
            if self.fail_candidates {
                return Err(ClientError::Status { status: 500, body: String::new() });
            }
            Ok(vec![candidate(1, "Alice Johnson", 5), candidate(2, "Bob Smith", 3)])
        }
        async fn cast_vote(&self, vote: &VoteRequest) -> Result<VoteReceipt, ClientError> {
            if self.reject_votes {
                return Err(ClientError::Status {
                    status: 409,
                    body: r#"{"error": "Voter has already voted"}"#.into(),
                });
            }
            self.votes.lock().unwrap().push(*vote);
            Ok(VoteReceipt { message: "ok".into() })
        }
        async fn get_blockchain(&self) -> Result<Vec<Block>, ClientError> {
            Ok(Vec::new())
        }
    }

    fn page(api: MockApi) -> (DashboardPage, Arc<MockApi>) {
        let api = Arc::new(api);
        let session = SessionContext::in_memory();
        session.set(Session::new("jwt", 7)).unwrap();
        let page = DashboardPage::new(api.clone(), session, LedgerBus::default(), Duration::ZERO);
        (page, api)
    }

    #[tokio::test]
    async fn test_load_and_derived_values() {
        let (mut page, _) = page(MockApi::default());
        assert_eq!(page.load().await, PageLoad::Ready);

        let data = page.data().unwrap();
        assert_eq!(data.percentage_voted(), "25.00");
        assert_eq!(data.rows()[0].share, "62.5");
        assert!(!page.flow().has_voted());
    }

    #[tokio::test]
    async fn test_load_redirects_without_session() {
        let api: Arc<dyn VotingApi> = Arc::new(MockApi::default());
        let mut page = DashboardPage::new(api, SessionContext::in_memory(), LedgerBus::default(), Duration::ZERO);
        assert_eq!(page.load().await, PageLoad::Redirect(Route::Entry));
    }

    #[tokio::test]
    async fn test_any_fetch_failure_fails_the_page() {
        let (mut page, _) = page(MockApi { fail_candidates: true, ..Default::default() });
        assert_eq!(page.load().await, PageLoad::Failed(DASHBOARD_LOAD_FAILED.to_string()));
        assert_eq!(page.error(), Some(DASHBOARD_LOAD_FAILED));
        assert!(page.data().is_none());
    }

    #[tokio::test]
    async fn test_optimistic_update_touches_only_the_chosen_candidate() {
        let (mut page, api) = page(MockApi::default());
        page.load().await;
        let mut events = page.bus.subscribe();

        assert_eq!(page.select(2).unwrap(), "Are you sure you want to vote for Bob Smith?");
        assert_eq!(page.confirm().await.unwrap(), VOTE_SUCCESS);

        let data = page.data().unwrap();
        assert_eq!(data.candidates[0].vote_count, 5);
        assert_eq!(data.candidates[1].vote_count, 4);
        assert!(data.has_voted());
        assert_eq!(api.votes.lock().unwrap().as_slice(), &[VoteRequest { voter_id: 7, candidate_id: 2 }]);
        assert_eq!(
            events.recv().await.unwrap(),
            LedgerEvent::VoteRecorded { voter_id: 7, candidate_id: 2 }
        );

        assert_eq!(page.select(1), Err(VoteError::Flow(FlowError::AlreadyVoted)));
        assert_eq!(page.candidate_list().notice(), Some("You have already voted!"));
    }

    #[tokio::test]
    async fn test_rejected_vote_leaves_state_untouched() {
        let (mut page, _) = page(MockApi { reject_votes: true, ..Default::default() });
        page.load().await;
        let before = page.data().cloned();

        let err = page.cast_vote(1).await.unwrap_err();
        assert_eq!(err, VoteError::Rejected("Voter has already voted".into()));
        assert_eq!(page.data().cloned(), before);
        assert!(!page.flow().has_voted());
        assert_eq!(page.message(), Some("Voter has already voted"));
    }

    #[tokio::test]
    async fn test_backend_reported_vote_blocks_request() {
        let (mut page, api) = page(MockApi { has_voted: true, ..Default::default() });
        page.load().await;
        assert_eq!(page.cast_vote(1).await, Err(VoteError::Flow(FlowError::AlreadyVoted)));
        assert!(api.votes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_candidate_and_cancel() {
        let (mut page, _) = page(MockApi::default());
        page.load().await;
        assert_eq!(page.select(99), Err(VoteError::UnknownCandidate(99)));

        page.select(1).unwrap();
        page.cancel();
        assert_eq!(page.confirm().await, Err(VoteError::NothingSelected));
    }
}
