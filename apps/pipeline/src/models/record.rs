use serde::{Deserialize, Serialize};

/// A normalized candidate/job record in the shape the intermediate file stores.
/// Nulls serialize as explicit `null`; no key is ever skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub person_id: String,
    pub job_id: Option<String>,
    pub job_name: Option<String>,
    pub job_description: Option<String>,
    pub cv_url: Option<String>,
    pub submission_type: Option<String>,
    pub employment_type: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub target_locations: String,
    pub must_have_keyword: Option<String>,
    pub nice_to_have_keyword: Option<String>,
    pub education_preferences: Option<String>,
    pub experience: Option<String>,
    pub current_titles: Option<String>,
}

impl CandidateRecord {
    /// The document URL, if the record carries a non-blank one.
    pub fn document_url(&self) -> Option<&str> {
        self.cv_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// A normalized record plus the text extracted from its résumé, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: CandidateRecord,
    #[serde(default)]
    pub cvtext: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_are_serialized_not_omitted() {
        let record = CandidateRecord {
            person_id: "42".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 14);
        assert!(obj["notes"].is_null());
        assert_eq!(obj["target_locations"], "");
    }

    #[test]
    fn test_enriched_record_flattens_with_cvtext() {
        let enriched = EnrichedRecord {
            record: CandidateRecord {
                person_id: "7".to_string(),
                cv_url: Some("https://cdn.example.com/7.pdf".to_string()),
                ..Default::default()
            },
            cvtext: None,
        };
        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["person_id"], "7");
        assert!(json["cvtext"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 15);
    }

    #[test]
    fn test_enriched_record_reads_file_without_cvtext() {
        let raw = r#"{"person_id":"9","job_id":null,"job_name":"Backend Engineer",
            "job_description":null,"cv_url":"","submission_type":"lead",
            "employment_type":null,"notes":null,"target_locations":"",
            "must_have_keyword":null,"nice_to_have_keyword":null,
            "education_preferences":null,"experience":null,"current_titles":null}"#;
        let enriched: EnrichedRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(enriched.record.job_name.as_deref(), Some("Backend Engineer"));
        assert_eq!(enriched.cvtext, None);
    }

    #[test]
    fn test_document_url_ignores_blank() {
        let mut record = CandidateRecord {
            cv_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.document_url(), None);
        record.cv_url = Some(" https://cdn.example.com/a.pdf ".to_string());
        assert_eq!(record.document_url(), Some("https://cdn.example.com/a.pdf"));
    }
}
