use serde_json::Value;

use crate::errors::PipelineError;
use crate::models::matching::{MatchRequestPayload, ResumeServiceUrl, SourcingRequirements};
use crate::models::record::EnrichedRecord;

/// Maps an enriched record onto the scoring service's request shape.
pub fn build_payload(entry: &EnrichedRecord) -> MatchRequestPayload {
    let record = &entry.record;
    MatchRequestPayload {
        job_description: record.job_description.clone(),
        notes: record.notes.clone(),
        sourcing_requirements: SourcingRequirements {
            must_have_keyword: record.must_have_keyword.clone(),
            nice_to_have_keyword: record.nice_to_have_keyword.clone(),
            target_locations: record.target_locations.clone(),
            education_preferences: record.education_preferences.clone(),
            target_schools: String::new(),
            experience: record.experience.clone(),
            current_titles: record.current_titles.clone(),
            target_companies: String::new(),
            employment_type: record.employment_type.clone(),
        },
        resume_service_urls: vec![ResumeServiceUrl {
            id: record.person_id.clone(),
            url: record.cv_url.clone(),
            resume_text: entry.cvtext.clone(),
        }],
    }
}

/// Replaces every `null` with `""`, at any depth, inside objects and arrays.
/// The scoring service rejects nulls.
pub fn coerce_nulls(value: Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::Array(items) => Value::Array(items.into_iter().map(coerce_nulls).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, coerce_nulls(value)))
                .collect(),
        ),
        other => other,
    }
}

/// The JSON body actually sent: the payload with nulls coerced away.
pub fn request_body(entry: &EnrichedRecord) -> Result<Value, PipelineError> {
    Ok(coerce_nulls(serde_json::to_value(build_payload(entry))?))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::record::CandidateRecord;

    fn contains_null(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Array(items) => items.iter().any(contains_null),
            Value::Object(map) => map.values().any(contains_null),
            _ => false,
        }
    }

    #[test]
    fn test_coerce_nulls_at_every_depth() {
        let input = json!({
            "a": null,
            "b": [null, 1, {"c": null, "d": [null]}],
            "e": {"f": {"g": null}},
            "h": false
        });
        let out = coerce_nulls(input);
        assert!(!contains_null(&out));
        assert_eq!(out["a"], "");
        assert_eq!(out["b"][0], "");
        assert_eq!(out["b"][1], 1);
        assert_eq!(out["b"][2]["d"][0], "");
        assert_eq!(out["e"]["f"]["g"], "");
        assert_eq!(out["h"], false);
    }

    #[test]
    fn test_request_body_for_sparse_record_has_no_nulls() {
        let entry = EnrichedRecord {
            record: CandidateRecord {
                person_id: "77".to_string(),
                ..Default::default()
            },
            cvtext: None,
        };
        let body = request_body(&entry).unwrap();
        assert!(!contains_null(&body));
        assert_eq!(body["resume_service_urls"][0]["resume_text"], "");
        assert_eq!(body["sourcing_requirements"]["must_have_keyword"], "");
    }

    #[test]
    fn test_build_payload_maps_fields() {
        let entry = EnrichedRecord {
            record: CandidateRecord {
                person_id: "12".to_string(),
                job_description: Some("Build the ingestion layer".to_string()),
                cv_url: Some("https://cdn.example.com/12.pdf".to_string()),
                notes: Some("Hiring manager: Sam".to_string()),
                target_locations: "NY, SF".to_string(),
                must_have_keyword: Some("Rust".to_string()),
                nice_to_have_keyword: Some("Kafka".to_string()),
                education_preferences: Some("BS CS".to_string()),
                experience: Some("5".to_string()),
                current_titles: Some("Backend Engineer".to_string()),
                employment_type: Some("full_time".to_string()),
                ..Default::default()
            },
            cvtext: Some("Jane Doe Rust engineer".to_string()),
        };

        let body = request_body(&entry).unwrap();
        assert_eq!(body["job_description"], "Build the ingestion layer");
        assert_eq!(body["notes"], "Hiring manager: Sam");

        let req = &body["sourcing_requirements"];
        assert_eq!(req["must_have_keyword"], "Rust");
        assert_eq!(req["nice_to_have_keyword"], "Kafka");
        assert_eq!(req["target_locations"], "NY, SF");
        assert_eq!(req["education_preferences"], "BS CS");
        assert_eq!(req["experience"], "5");
        assert_eq!(req["current_titles"], "Backend Engineer");
        assert_eq!(req["employment_type"], "full_time");
        assert_eq!(req["target_schools"], "");
        assert_eq!(req["target_companies"], "");

        let docs = body["resume_service_urls"].as_array().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["id"], "12");
        assert_eq!(docs[0]["url"], "https://cdn.example.com/12.pdf");
        assert_eq!(docs[0]["resume_text"], "Jane Doe Rust engineer");
    }
}
