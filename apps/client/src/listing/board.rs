//! Optimistic candidate status changes.
//!
//! The board applies a status change locally before the backend confirms
//! it. The returned [`PendingStatus`] restores the previous status if the
//! request fails.

use tracing::debug;

use crate::models::candidate::{Candidate, CandidateStatistics, CandidateStatus};
use crate::models::RecordId;

#[derive(Debug, Default)]
pub struct CandidateBoard {
    candidates: Vec<Candidate>,
}

/// Receipt for an optimistic change; hand it back to `revert` on failure.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStatus {
    candidate_id: RecordId,
    previous: CandidateStatus,
}

impl CandidateBoard {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, id: &RecordId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.candidate_id == id)
    }

    /// Applies `status` locally. `None` when the candidate is unknown or
    /// already in that status.
    pub fn set_status(&mut self, id: &RecordId, status: CandidateStatus) -> Option<PendingStatus> {
        let candidate = self.candidates.iter_mut().find(|c| &c.candidate_id == id)?;
        if candidate.status == status {
            return None;
        }
        let previous = std::mem::replace(&mut candidate.status, status);
        debug!("Candidate {id}: {previous} -> {status} (pending)");
        Some(PendingStatus {
            candidate_id: id.clone(),
            previous,
        })
    }

    pub fn revert(&mut self, pending: PendingStatus) {
        if let Some(c) = self
            .candidates
            .iter_mut()
            .find(|c| c.candidate_id == pending.candidate_id)
        {
            debug!("Candidate {}: reverted to {}", c.candidate_id, pending.previous);
            c.status = pending.previous;
        }
    }

    /// Counts recomputed from the local list, so they follow optimistic edits.
    pub fn statistics(&self) -> CandidateStatistics {
        let count = |st: CandidateStatus| self.candidates.iter().filter(|c| c.status == st).count() as u32;
        let scored: Vec<f64> = self.candidates.iter().filter_map(|c| c.final_score).collect();
        CandidateStatistics {
            total_candidates: self.candidates.len() as u32,
            available: count(CandidateStatus::Available),
            under_review: count(CandidateStatus::UnderReview),
            interview_scheduled: count(CandidateStatus::InterviewScheduled),
            hired: count(CandidateStatus::Hired),
            average_match_score: (!scored.is_empty())
                .then(|| scored.iter().sum::<f64>() / scored.len() as f64),
        }
    }
}
