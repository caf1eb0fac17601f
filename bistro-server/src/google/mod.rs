//! Google Places client: fetch a place's reviews for import

use serde::Deserialize;
use shared::models::ImportCandidate;
use thiserror::Error;

/// Comment used when a Google review has a rating but no text
pub const DEFAULT_REVIEW_TEXT: &str = "Great service!";

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("Google API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Google API returned status: {0}")]
    Status(String),
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceReview {
    #[serde(default)]
    pub author_name: String,
    pub rating: i32,
    #[serde(default)]
    pub text: String,
    /// Unix seconds; doubles as the review's identity
    pub time: i64,
    pub profile_photo_url: Option<String>,
}

impl PlaceReview {
    pub fn into_candidate(self) -> ImportCandidate {
        let comment = if self.text.trim().is_empty() {
            DEFAULT_REVIEW_TEXT.to_string()
        } else {
            self.text
        };
        ImportCandidate {
            google_review_id: self.time.to_string(),
            customer_name: self.author_name,
            rating: self.rating,
            comment,
            review_date: Some(self.time * 1000),
            profile_photo_url: self.profile_photo_url,
        }
    }
}

/// Turn a details response into import candidates
pub fn candidates_from(response: PlaceDetailsResponse) -> Result<Vec<ImportCandidate>, GoogleError> {
    if response.status != "OK" {
        return Err(GoogleError::Status(response.status));
    }
    Ok(response
        .result
        .map(|r| r.reviews)
        .unwrap_or_default()
        .into_iter()
        .map(PlaceReview::into_candidate)
        .collect())
}

/// Fetch the reviews Google exposes for a place
pub async fn fetch_reviews(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    place_id: &str,
) -> Result<Vec<ImportCandidate>, GoogleError> {
    let url = format!("{}/details/json", base_url.trim_end_matches('/'));
    let response: PlaceDetailsResponse = http
        .get(url)
        .query(&[("place_id", place_id), ("fields", "reviews"), ("key", api_key)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    candidates_from(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidates_from_response() {
        let response: PlaceDetailsResponse = serde_json::from_value(json!({
            "status": "OK",
            "result": {
                "reviews": [
                    {"author_name": "Ana", "rating": 5, "text": "Odlično", "time": 1700000000,
                     "profile_photo_url": "https://example.com/a.png"},
                    {"author_name": "Ivan", "rating": 4, "text": "", "time": 1700000100}
                ]
            }
        }))
        .unwrap();

        let candidates = candidates_from(response).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].google_review_id, "1700000000");
        assert_eq!(candidates[0].review_date, Some(1_700_000_000_000));
        assert_eq!(candidates[1].comment, DEFAULT_REVIEW_TEXT);
        assert_eq!(candidates[1].profile_photo_url, None);
    }

    #[test]
    fn test_non_ok_status() {
        let response: PlaceDetailsResponse =
            serde_json::from_value(json!({"status": "REQUEST_DENIED"})).unwrap();
        let err = candidates_from(response).unwrap_err();
        assert!(matches!(err, GoogleError::Status(s) if s == "REQUEST_DENIED"));
    }

    #[test]
    fn test_missing_result_yields_no_candidates() {
        let response: PlaceDetailsResponse =
            serde_json::from_value(json!({"status": "OK"})).unwrap();
        assert!(candidates_from(response).unwrap().is_empty());
    }
}
