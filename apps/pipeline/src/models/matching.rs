use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /match`.
/// Optional fields serialize as `null` here; they are coerced to `""` before
/// the payload leaves the process.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRequestPayload {
    pub job_description: Option<String>,
    pub notes: Option<String>,
    pub sourcing_requirements: SourcingRequirements,
    pub resume_service_urls: Vec<ResumeServiceUrl>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourcingRequirements {
    pub must_have_keyword: Option<String>,
    pub nice_to_have_keyword: Option<String>,
    pub target_locations: String,
    pub education_preferences: Option<String>,
    /// No source column populates this; always sent empty.
    pub target_schools: String,
    pub experience: Option<String>,
    pub current_titles: Option<String>,
    /// No source column populates this; always sent empty.
    pub target_companies: String,
    pub employment_type: Option<String>,
}

/// The candidate document the scoring service should read.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeServiceUrl {
    pub id: String,
    pub url: Option<String>,
    pub resume_text: Option<String>,
}

/// Response body of the scoring service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub results: Vec<MatchResult>,
}

/// One scored candidate. Field shapes are owned by the scoring service, so
/// they are kept as raw JSON values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchResult {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub score: Value,
    #[serde(default)]
    pub confidence: Value,
    #[serde(default)]
    pub consistency: Value,
    #[serde(default)]
    pub detailed_scoring: Value,
}
