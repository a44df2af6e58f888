// Record Fetcher
// One fixed query over submissions/jobs/people, one row per (person, job) pair.

pub mod ranking;

use std::sync::LazyLock;

use sqlx::PgPool;
use tracing::info;

use crate::errors::PipelineError;
use crate::models::submission::SubmissionRow;
use ranking::dedupe_by_status;

/// Job-title fragments that mark a role as engineering (matched with ILIKE).
pub const ENGINEERING_TITLE_TERMS: &[&str] = &[
    "software",
    "developer",
    "frontend",
    "front end",
    "backend",
    "back end",
    "full stack",
    "application",
    "web",
    "java",
    "python",
    "ruby",
    "qa",
    "devops",
    "site reliability",
    "ml",
    "machine learning",
    "ai",
    "data engineer",
    "dataops",
];

static CANDIDATE_QUERY: LazyLock<String> = LazyLock::new(build_candidate_query);

fn build_candidate_query() -> String {
    let rank = ranking::status_rank_case_sql("s.submission_type");
    let title_filter = ENGINEERING_TITLE_TERMS
        .iter()
        .map(|term| format!("j.name ILIKE '%{term}%'"))
        .collect::<Vec<_>>()
        .join(" OR ");

    format!(
        r#"
        WITH ranked_submissions AS (
            SELECT
                s.person_id::text AS person_id,
                s.job_id::text AS job_id,
                j.name AS job_name,
                j.description AS job_description,
                j.experience_years::text AS experience_years,
                j.nice_to_have_skills,
                j.skills,
                j.school_names,
                j.location,
                j.prefered_titles,
                j.location_preference,
                j.employment_type,
                j.add_notes,
                p.cv_url,
                s.submission_type,
                {rank} AS status_rank,
                ROW_NUMBER() OVER (
                    PARTITION BY s.person_id, s.job_id
                    ORDER BY {rank}
                ) AS rn
            FROM submissions s
            LEFT JOIN jobs j ON s.job_id = j.id
            LEFT JOIN people p ON s.person_id = p.id
            WHERE ({title_filter})
              AND p.cv_url IS NOT NULL
              AND p.cv_url <> ''
        )
        SELECT
            person_id,
            job_id,
            job_name,
            job_description,
            cv_url,
            submission_type,
            experience_years,
            nice_to_have_skills,
            skills,
            school_names,
            prefered_titles,
            location_preference,
            employment_type,
            add_notes,
            location
        FROM ranked_submissions
        WHERE rn = 1
        ORDER BY status_rank, job_name
        LIMIT $1
        "#
    )
}

/// Runs the candidate query and returns at most `limit` rows, highest
/// priority first. Any connection or query error is fatal.
pub async fn fetch_submissions(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<SubmissionRow>, PipelineError> {
    let rows = sqlx::query_as::<_, SubmissionRow>(CANDIDATE_QUERY.as_str())
        .bind(limit)
        .fetch_all(pool)
        .await?;
    let fetched = rows.len();

    let rows = dedupe_by_status(rows);
    info!(fetched, kept = rows.len(), limit, "Fetched candidate submissions");
    Ok(rows)
}
