//! Review Model
//!
//! Moderation is a two-state lifecycle: submitted reviews start pending
//! (`is_approved = false`) and an admin either approves them or deletes them.

use crate::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Lowest rating imported from an external source
pub const MIN_IMPORT_RATING: i32 = 4;

/// Where a review came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSource {
    Google,
    Manual,
}

impl ReviewSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for ReviewSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(Self::Google),
            "manual" => Ok(Self::Manual),
            _ => Err(()),
        }
    }
}

/// Review entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub customer_name: String,
    /// 1..=5 stars
    pub rating: i32,
    pub comment: String,
    pub is_approved: bool,
    pub source: ReviewSource,
    /// De-duplication key for imported reviews
    pub google_review_id: Option<String>,
    /// Original review date (Unix millis)
    pub review_date: Option<i64>,
    pub profile_photo_url: Option<String>,
    pub created_at: i64,
}

/// Public submission payload
///
/// Only these fields are read; anything else a client sends (`isApproved`,
/// `source`, ...) is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmit {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

/// A validated submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub customer_name: String,
    pub rating: i32,
    pub comment: String,
}

impl ReviewSubmit {
    pub fn validate(&self) -> Result<ReviewDraft, ValidationErrors> {
        let mut errs = ValidationErrors::new();
        errs.require_text(&self.customer_name, "customerName", "Name", MAX_NAME_LEN);
        if !(1..=5).contains(&self.rating) {
            errs.add("rating", "Rating must be between 1 and 5");
        }
        errs.require_text(&self.comment, "comment", "Comment", MAX_NOTE_LEN);
        errs.into_result()?;

        Ok(ReviewDraft {
            customer_name: self.customer_name.trim().to_string(),
            rating: self.rating,
            comment: self.comment.trim().to_string(),
        })
    }
}

/// A review offered by an external source for import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCandidate {
    pub google_review_id: String,
    pub customer_name: String,
    pub rating: i32,
    pub comment: String,
    pub review_date: Option<i64>,
    pub profile_photo_url: Option<String>,
}

/// Candidates that survive the rating filter and in-batch de-duplication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    pub candidates: Vec<ImportCandidate>,
    /// Number of candidates with an importable rating (before de-duplication)
    pub total: usize,
}

/// Filter a batch down to what is worth looking up: rating at least
/// [`MIN_IMPORT_RATING`], first occurrence of each id.
pub fn plan_import(batch: Vec<ImportCandidate>) -> ImportPlan {
    let mut seen = HashSet::new();
    let mut total = 0;
    let mut candidates = Vec::new();

    for candidate in batch {
        if candidate.rating < MIN_IMPORT_RATING {
            continue;
        }
        total += 1;
        if seen.insert(candidate.google_review_id.clone()) {
            candidates.push(candidate);
        }
    }

    ImportPlan { candidates, total }
}

/// Outcome of an import run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(id: &str, rating: i32) -> ImportCandidate {
        ImportCandidate {
            google_review_id: id.into(),
            customer_name: "Ana".into(),
            rating,
            comment: "Great service!".into(),
            review_date: None,
            profile_photo_url: None,
        }
    }

    #[test]
    fn test_submit_valid() {
        let draft = ReviewSubmit {
            customer_name: " Marko ".into(),
            rating: 5,
            comment: "Best pizza in town".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(draft.customer_name, "Marko");
        assert_eq!(draft.rating, 5);
    }

    #[test]
    fn test_submit_rating_bounds() {
        for rating in [0, 6, -1] {
            let errs = ReviewSubmit {
                customer_name: "Marko".into(),
                rating,
                comment: "ok".into(),
            }
            .validate()
            .unwrap_err();
            assert!(errs.has_field("rating"));
        }
    }

    #[test]
    fn test_submit_blank_text() {
        let errs = ReviewSubmit {
            customer_name: "  ".into(),
            rating: 3,
            comment: "\t".into(),
        }
        .validate()
        .unwrap_err();
        assert!(errs.has_field("customerName"));
        assert!(errs.has_field("comment"));
    }

    #[test]
    fn test_submit_ignores_moderation_fields() {
        let submit: ReviewSubmit = serde_json::from_value(json!({
            "customerName": "Jelena",
            "rating": 4,
            "comment": "Nice",
            "isApproved": true,
            "source": "google"
        }))
        .unwrap();
        assert!(submit.validate().is_ok());
    }

    #[test]
    fn test_plan_import_filters_low_ratings() {
        let plan = plan_import(vec![
            candidate("a", 5),
            candidate("b", 3),
            candidate("c", 4),
            candidate("d", 2),
        ]);
        assert_eq!(plan.total, 2);
        let ids: Vec<_> = plan
            .candidates
            .iter()
            .map(|c| c.google_review_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_plan_import_dedups_within_batch() {
        let plan = plan_import(vec![candidate("a", 5), candidate("a", 5), candidate("b", 4)]);
        assert_eq!(plan.total, 3);
        assert_eq!(plan.candidates.len(), 2);
    }
}
