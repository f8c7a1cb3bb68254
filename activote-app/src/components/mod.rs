pub mod blockchain_viewer;
pub mod candidate_list;
pub mod charts;
pub mod statistics;
pub mod vote_status;

pub use blockchain_viewer::{BlockDetail, BlockchainViewer, Linkage, BLOCKS_TO_SHOW};
pub use candidate_list::{CandidateList, CandidateRow};
pub use charts::{CandidateVotesChart, VoteDistribution};
pub use statistics::StatisticsCard;
pub use vote_status::UserVoteStatus;
