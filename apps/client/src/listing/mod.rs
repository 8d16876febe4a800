// Local post-processing of API results: score display, search filters,
// and optimistic pipeline updates. Nothing here talks to the network.

pub mod board;
pub mod filters;
pub mod scores;

pub use board::{CandidateBoard, PendingStatus};
pub use filters::{CandidateQuery, JobQuery, MatchQuery};
pub use scores::{matched_skills, missing_skills, normalize_score, ScoreTier, TierCounts};
