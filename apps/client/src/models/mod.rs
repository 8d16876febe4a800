pub mod candidate;
pub mod chat;
pub mod job;
pub mod matches;
pub mod profile;
pub mod user;

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Identifier as the backend sends it: numeric for SQL rows, string for
/// document ids. Compared and displayed by its textual form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RecordId::Int(a), RecordId::Int(b)) => a == b,
            (RecordId::Text(a), RecordId::Text(b)) => a == b,
            (RecordId::Int(n), RecordId::Text(s)) | (RecordId::Text(s), RecordId::Int(n)) => *s == n.to_string(),
        }
    }
}

impl Eq for RecordId {}

// must agree with `eq`: both variants hash their textual form
impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            RecordId::Int(n) => n.to_string().hash(state),
            RecordId::Text(s) => s.hash(state),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_accepts_numbers_and_strings() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[42, "65f0c2"]"#).unwrap();
        assert_eq!(ids[0], RecordId::Int(42));
        assert_eq!(ids[1].to_string(), "65f0c2");
    }

    #[test]
    fn test_numeric_and_string_ids_are_equal_by_text() {
        use std::collections::HashSet;

        assert_eq!(RecordId::Int(7), RecordId::from("7"));
        assert_eq!(RecordId::from("7"), RecordId::Int(7));
        assert_ne!(RecordId::Int(7), RecordId::from("07"));

        let set: HashSet<RecordId> = [RecordId::Int(7), RecordId::from("7")].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
