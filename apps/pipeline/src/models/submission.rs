use sqlx::FromRow;

/// One ranked submission row as stored, before any cleanup.
/// Every column is read as text; the fetch query casts non-text columns.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct SubmissionRow {
    pub person_id: String,
    pub job_id: Option<String>,
    pub job_name: Option<String>,
    pub job_description: Option<String>,
    pub cv_url: Option<String>,
    pub submission_type: Option<String>,
    pub experience_years: Option<String>,
    pub nice_to_have_skills: Option<String>,
    pub skills: Option<String>,
    pub school_names: Option<String>,
    pub prefered_titles: Option<String>,
    pub location_preference: Option<String>,
    pub employment_type: Option<String>,
    pub add_notes: Option<String>,
    pub location: Option<String>,
}
