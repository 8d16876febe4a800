use std::fmt;

/// Percentage shown for a backend score. Scores up to 1.0 are fractions,
/// anything above is already a percentage.
pub fn normalize_score(score: Option<f64>) -> u32 {
    match score {
        Some(s) if s.is_finite() && s > 0.0 => {
            let pct = if s > 1.0 { s } else { s * 100.0 };
            pct.round() as u32
        }
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScoreTier {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl ScoreTier {
    pub const ALL: [ScoreTier; 5] = [
        ScoreTier::Excellent,
        ScoreTier::VeryGood,
        ScoreTier::Good,
        ScoreTier::Fair,
        ScoreTier::Poor,
    ];

    pub fn of(percent: u32) -> Self {
        match percent {
            90.. => ScoreTier::Excellent,
            80..=89 => ScoreTier::VeryGood,
            70..=79 => ScoreTier::Good,
            60..=69 => ScoreTier::Fair,
            _ => ScoreTier::Poor,
        }
    }

    pub fn of_score(score: Option<f64>) -> Self {
        Self::of(normalize_score(score))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::VeryGood => "verygood",
            ScoreTier::Good => "good",
            ScoreTier::Fair => "fair",
            ScoreTier::Poor => "poor",
        }
    }

    /// Parses a filter keyword; `all` and unknown words mean no tier filter.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of scores falling in each tier, in `ScoreTier::ALL` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts(pub [usize; 5]);

impl TierCounts {
    pub fn tally(scores: impl IntoIterator<Item = Option<f64>>) -> Self {
        let mut counts = [0usize; 5];
        for score in scores {
            counts[ScoreTier::of_score(score) as usize] += 1;
        }
        TierCounts(counts)
    }

    pub fn get(&self, tier: ScoreTier) -> usize {
        self.0[tier as usize]
    }
}

/// Resume skills the job also asks for (case-insensitive), in resume order.
pub fn matched_skills<'a>(resume: &'a [String], job: &[String]) -> Vec<&'a str> {
    resume
        .iter()
        .filter(|skill| job.iter().any(|j| j.eq_ignore_ascii_case(skill)))
        .map(String::as_str)
        .collect()
}

/// Job skills the resume lacks (case-insensitive), in job order.
pub fn missing_skills<'a>(resume: &[String], job: &'a [String]) -> Vec<&'a str> {
    job.iter()
        .filter(|skill| !resume.iter().any(|r| r.eq_ignore_ascii_case(skill)))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_fraction_and_percentage() {
        assert_eq!(normalize_score(Some(0.876)), 88);
        assert_eq!(normalize_score(Some(1.0)), 100);
        assert_eq!(normalize_score(Some(72.4)), 72);
        assert_eq!(normalize_score(Some(0.0)), 0);
        assert_eq!(normalize_score(None), 0);
        assert_eq!(normalize_score(Some(f64::NAN)), 0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ScoreTier::of(90), ScoreTier::Excellent);
        assert_eq!(ScoreTier::of(89), ScoreTier::VeryGood);
        assert_eq!(ScoreTier::of(70), ScoreTier::Good);
        assert_eq!(ScoreTier::of(60), ScoreTier::Fair);
        assert_eq!(ScoreTier::of(59), ScoreTier::Poor);
        assert_eq!(ScoreTier::of_score(Some(0.95)), ScoreTier::Excellent);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!(ScoreTier::parse("VeryGood"), Some(ScoreTier::VeryGood));
        assert_eq!(ScoreTier::parse("all"), None);
    }

    #[test]
    fn test_tally() {
        let counts = TierCounts::tally([Some(0.95), Some(91.0), Some(0.65), None]);
        assert_eq!(counts.get(ScoreTier::Excellent), 2);
        assert_eq!(counts.get(ScoreTier::Fair), 1);
        assert_eq!(counts.get(ScoreTier::Poor), 1);
        assert_eq!(counts.get(ScoreTier::Good), 0);
    }

    #[test]
    fn test_skill_overlap_is_case_insensitive() {
        let resume = skills(&["Rust", "python", "SQL"]);
        let job = skills(&["rust", "Kubernetes", "sql"]);
        assert_eq!(matched_skills(&resume, &job), vec!["Rust", "SQL"]);
        assert_eq!(missing_skills(&resume, &job), vec!["Kubernetes"]);
        assert_eq!(missing_skills(&[], &job).len(), 3);
    }
}
