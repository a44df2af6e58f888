//! Submission status ranking: picks one submission per (person, job) pair.
//!
//! The same ordering drives the SQL `CASE` expression and the in-process
//! dedup pass, so the two can never disagree.

use std::collections::HashMap;

use crate::models::submission::SubmissionRow;

/// Pipeline stage a submission reached. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Hired,
    Offer,
    SecondInterview,
    FirstInterview,
    RecruiterScreen,
    Applicant,
    Submitted,
    Lead,
    Onhold,
    Reject,
}

/// Rank given to null or unrecognized submission types.
pub const UNKNOWN_RANK: u8 = 11;

impl SubmissionStage {
    pub const ALL: [SubmissionStage; 10] = [
        SubmissionStage::Hired,
        SubmissionStage::Offer,
        SubmissionStage::SecondInterview,
        SubmissionStage::FirstInterview,
        SubmissionStage::RecruiterScreen,
        SubmissionStage::Applicant,
        SubmissionStage::Submitted,
        SubmissionStage::Lead,
        SubmissionStage::Onhold,
        SubmissionStage::Reject,
    ];

    /// The label stored in `submissions.submission_type`.
    pub fn label(self) -> &'static str {
        match self {
            SubmissionStage::Hired => "hired",
            SubmissionStage::Offer => "offer",
            SubmissionStage::SecondInterview => "second_interview",
            SubmissionStage::FirstInterview => "first_interview",
            SubmissionStage::RecruiterScreen => "recruiter_screen",
            SubmissionStage::Applicant => "applicant",
            SubmissionStage::Submitted => "submitted",
            SubmissionStage::Lead => "lead",
            SubmissionStage::Onhold => "onhold",
            SubmissionStage::Reject => "reject",
        }
    }

    /// 1 (hired) through 10 (reject).
    pub fn rank(self) -> u8 {
        self as u8 + 1
    }

    /// Exact, case-sensitive match against the stored label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.label() == label)
    }
}

/// Rank of a raw `submission_type` value; lower wins.
pub fn status_rank(submission_type: Option<&str>) -> u8 {
    submission_type
        .and_then(SubmissionStage::from_label)
        .map(SubmissionStage::rank)
        .unwrap_or(UNKNOWN_RANK)
}

/// Renders the ranking as a SQL `CASE` over `column`.
pub fn status_rank_case_sql(column: &str) -> String {
    let mut sql = String::from("CASE");
    for stage in SubmissionStage::ALL {
        sql.push_str(&format!(
            " WHEN {column} = '{}' THEN {}",
            stage.label(),
            stage.rank()
        ));
    }
    sql.push_str(&format!(" ELSE {UNKNOWN_RANK} END"));
    sql
}

/// Keeps one row per (person_id, job_id): the lowest status rank, and on a
/// tie the row seen first. Survivors keep their original relative order.
pub fn dedupe_by_status(rows: Vec<SubmissionRow>) -> Vec<SubmissionRow> {
    let mut best: HashMap<(String, Option<String>), usize> = HashMap::new();

    for (idx, row) in rows.iter().enumerate() {
        let key = (row.person_id.clone(), row.job_id.clone());
        let rank = status_rank(row.submission_type.as_deref());
        match best.get(&key) {
            Some(&kept) if status_rank(rows[kept].submission_type.as_deref()) <= rank => {}
            _ => {
                best.insert(key, idx);
            }
        }
    }

    let mut keep: Vec<usize> = best.into_values().collect();
    keep.sort_unstable();

    let mut rows: Vec<Option<SubmissionRow>> = rows.into_iter().map(Some).collect();
    keep.into_iter().filter_map(|idx| rows[idx].take()).collect()
}
