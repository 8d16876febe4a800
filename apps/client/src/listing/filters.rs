use crate::listing::scores::{normalize_score, ScoreTier};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::job::Job;
use crate::models::matches::Match;

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

fn normalized(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Job search box plus location and type dropdowns.
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    pub term: String,
    pub location: String,
    pub job_type: String,
}

impl JobQuery {
    pub fn matches(&self, job: &Job) -> bool {
        let term = normalized(&self.term);
        let location = normalized(&self.location);
        let job_type = normalized(&self.job_type);

        let term_ok = term.is_empty()
            || contains_ci(job.display_title(), &term)
            || contains_ci(job.company.as_deref(), &term)
            || contains_ci(job.description.as_deref(), &term);
        let location_ok = location.is_empty() || contains_ci(job.location.as_deref(), &location);
        let type_ok = job_type.is_empty() || job.kind().is_some_and(|k| k.to_lowercase() == job_type);

        term_ok && location_ok && type_ok
    }

    pub fn apply<'a>(&self, jobs: &'a [Job]) -> Vec<&'a Job> {
        jobs.iter().filter(|j| self.matches(j)).collect()
    }
}

/// Recruiter match list: free text plus an optional score tier.
#[derive(Debug, Clone, Default)]
pub struct MatchQuery {
    pub term: String,
    pub tier: Option<ScoreTier>,
}

impl MatchQuery {
    pub fn matches(&self, m: &Match) -> bool {
        let term = normalized(&self.term);
        let id_hit = |id: &Option<crate::models::RecordId>| {
            id.as_ref().is_some_and(|id| id.to_string().contains(self.term.trim()))
        };
        let term_ok = term.is_empty()
            || contains_ci(m.title.as_deref(), &term)
            || contains_ci(m.name.as_deref(), &term)
            || id_hit(&m.job_id)
            || id_hit(&m.resume_id);
        let tier_ok = self
            .tier
            .map_or(true, |tier| ScoreTier::of_score(m.final_score) == tier);
        term_ok && tier_ok
    }

    pub fn apply<'a>(&self, matches: &'a [Match]) -> Vec<&'a Match> {
        matches.iter().filter(|m| self.matches(m)).collect()
    }
}

/// Recruiter candidate table filters.
#[derive(Debug, Clone, Default)]
pub struct CandidateQuery {
    pub term: String,
    pub skill: String,
    pub location: String,
    pub min_score: Option<u32>,
    pub status: Option<CandidateStatus>,
}

impl CandidateQuery {
    pub fn matches(&self, c: &Candidate) -> bool {
        let term = normalized(&self.term);
        let skill = normalized(&self.skill);
        let location = normalized(&self.location);

        let term_ok = term.is_empty()
            || contains_ci(c.name.as_deref(), &term)
            || contains_ci(c.email.as_deref(), &term)
            || contains_ci(c.job_title.as_deref(), &term);
        let skill_ok = skill.is_empty() || c.skills.iter().any(|s| s.to_lowercase().contains(&skill));
        let location_ok = location.is_empty() || contains_ci(c.location.as_deref(), &location);
        let score_ok = self
            .min_score
            .map_or(true, |min| normalize_score(c.final_score) >= min);
        let status_ok = self.status.map_or(true, |st| c.status == st);

        term_ok && skill_ok && location_ok && score_ok && status_ok
    }

    pub fn apply<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
        candidates.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Best score first; unscored entries sink. Stable for equal scores.
pub fn sort_by_score<T>(items: &mut [T], score: impl Fn(&T) -> Option<f64>) {
    items.sort_by_key(|item| std::cmp::Reverse(normalize_score(score(item))));
}
