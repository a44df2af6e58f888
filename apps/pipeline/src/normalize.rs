//! Text Normalizer: markup/entity cleanup and field renaming for fetched rows.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::record::CandidateRecord;
use crate::models::submission::SubmissionRow;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Mis-decoded UTF-8 bullet (U+2022 read as Windows-1252) plus the bullet itself.
const BULLET_SEQUENCES: &[&str] = &["\u{e2}\u{20ac}\u{a2}", "\u{2022}"];

/// Cleans a database text field: strips tags, decodes HTML entities, undoes
/// doubled escapes, and collapses all whitespace to single spaces.
///
/// Repeats until the text stops changing, so double-escaped input
/// (`&amp;lt;b&amp;gt;`) is fully cleaned and the result is a fixed point.
/// Escaped angle brackets therefore read as markup on the next pass: text
/// between a decoded `<` and `>` is dropped (`Vec&lt;T&gt;` becomes `Vec`).
pub fn clean_text(value: &str) -> String {
    let mut current = clean_once(value);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(value: &str) -> String {
    let stripped = TAG_RE.replace_all(value, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    let unescaped = decoded.replace("\\/", "/").replace("\\\\", "\\");
    WHITESPACE_RE.replace_all(&unescaped, " ").trim().to_string()
}

/// `clean_text` lifted over nullable columns; null stays null.
pub fn clean_field(value: Option<&str>) -> Option<String> {
    value.map(clean_text)
}

/// Merges two comma-separated location lists, preference first.
/// Segments are trimmed, blanks dropped, and each kept once in first-seen order.
pub fn combine_locations(preference: Option<&str>, location: Option<&str>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for source in [preference, location].into_iter().flatten() {
        for segment in source.split(',').map(str::trim) {
            if !segment.is_empty() && !parts.contains(&segment) {
                parts.push(segment);
            }
        }
    }
    parts.join(", ")
}

/// Cleans every field of a fetched row and maps it onto the API field names.
pub fn normalize_row(row: &SubmissionRow) -> CandidateRecord {
    let location_preference = clean_field(row.location_preference.as_deref());
    let location = clean_field(row.location.as_deref());

    CandidateRecord {
        person_id: clean_text(&row.person_id),
        job_id: clean_field(row.job_id.as_deref()),
        job_name: clean_field(row.job_name.as_deref()),
        job_description: clean_field(row.job_description.as_deref()),
        cv_url: clean_field(row.cv_url.as_deref()),
        submission_type: clean_field(row.submission_type.as_deref()),
        employment_type: clean_field(row.employment_type.as_deref()),
        notes: clean_field(row.add_notes.as_deref()),
        target_locations: combine_locations(location_preference.as_deref(), location.as_deref()),
        must_have_keyword: clean_field(row.skills.as_deref()),
        nice_to_have_keyword: clean_field(row.nice_to_have_skills.as_deref()),
        education_preferences: clean_field(row.school_names.as_deref()),
        experience: clean_field(row.experience_years.as_deref()),
        current_titles: clean_field(row.prefered_titles.as_deref()),
    }
}

/// Flattens text pulled out of a PDF: drops NUL bytes, turns bullets and
/// hyphens into spaces, and collapses whitespace.
pub fn normalize_document_text(text: &str) -> String {
    let mut text = text.replace('\0', "");
    for bullet in BULLET_SEQUENCES {
        text = text.replace(bullet, " ");
    }
    let text = text.replace('-', " ");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_tags_and_entities() {
        assert_eq!(
            clean_text("<p>Build&nbsp;APIs &amp; <b>services</b></p>"),
            "Build APIs & services"
        );
    }

    #[test]
    fn test_clean_text_unescapes_doubled_sequences() {
        assert_eq!(clean_text(r"https:\/\/jobs.example.com"), "https://jobs.example.com");
        assert_eq!(clean_text(r"C:\\tools"), r"C:\tools");
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Rust,\n\n\tGo,\r\n  SQL  "), "Rust, Go, SQL");
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        let inputs = [
            "<div>Senior&nbsp;Engineer</div>\n\n",
            "&amp;lt;b&amp;gt;bold&amp;lt;/b&amp;gt;",
            r"a\\\\b \/ c",
            "&#9;tab&#10;newline",
            "plain text",
            "",
        ];
        for input in inputs {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_clean_text_double_escaped_markup() {
        assert_eq!(clean_text("&amp;lt;b&amp;gt;bold&amp;lt;/b&amp;gt;"), "bold");
    }

    #[test]
    fn test_clean_text_drops_escaped_angle_bracket_spans() {
        assert_eq!(
            clean_text("Experience with Vec&lt;T&gt; and HashMap&lt;K, V&gt; required"),
            "Experience with Vec and HashMap required"
        );
        assert_eq!(clean_text("salary &lt; 100k and bonus &gt; 10%"), "salary 10%");
        // A lone escaped bracket has no closing partner and survives.
        assert_eq!(clean_text("latency &lt; 5ms"), "latency < 5ms");
    }

    #[test]
    fn test_combine_locations_dedupes_in_first_seen_order() {
        assert_eq!(combine_locations(Some("NY, NY"), Some("NY, SF")), "NY, SF");
        assert_eq!(
            combine_locations(Some("Remote"), Some("Austin, Remote, Denver")),
            "Remote, Austin, Denver"
        );
    }

    #[test]
    fn test_combine_locations_skips_blank_and_null() {
        assert_eq!(combine_locations(None, Some(" , Berlin,, ")), "Berlin");
        assert_eq!(combine_locations(Some("   "), None), "");
        assert_eq!(combine_locations(None, None), "");
    }

    #[test]
    fn test_normalize_row_renames_fields() {
        let row = SubmissionRow {
            person_id: "101".to_string(),
            job_id: Some("55".to_string()),
            job_name: Some("Backend <em>Engineer</em>".to_string()),
            skills: Some("Rust,&nbsp;Postgres".to_string()),
            nice_to_have_skills: Some("Kafka".to_string()),
            school_names: Some("MIT".to_string()),
            experience_years: Some("5".to_string()),
            prefered_titles: Some("SWE".to_string()),
            add_notes: Some("Referral\n\nfrom Dana".to_string()),
            location_preference: Some("NY, NY".to_string()),
            location: Some("NY, SF".to_string()),
            ..Default::default()
        };

        let record = normalize_row(&row);
        assert_eq!(record.person_id, "101");
        assert_eq!(record.job_name.as_deref(), Some("Backend Engineer"));
        assert_eq!(record.must_have_keyword.as_deref(), Some("Rust, Postgres"));
        assert_eq!(record.nice_to_have_keyword.as_deref(), Some("Kafka"));
        assert_eq!(record.education_preferences.as_deref(), Some("MIT"));
        assert_eq!(record.experience.as_deref(), Some("5"));
        assert_eq!(record.current_titles.as_deref(), Some("SWE"));
        assert_eq!(record.notes.as_deref(), Some("Referral from Dana"));
        assert_eq!(record.target_locations, "NY, SF");
    }

    #[test]
    fn test_normalize_row_keeps_nulls() {
        let record = normalize_row(&SubmissionRow {
            person_id: "1".to_string(),
            ..Default::default()
        });
        assert_eq!(record.job_description, None);
        assert_eq!(record.cv_url, None);
        assert_eq!(record.target_locations, "");
    }

    #[test]
    fn test_normalize_document_text() {
        let raw = "Jane Doe\0\n\u{e2}\u{20ac}\u{a2} Rust\u{2022}Go\nfull-stack   engineer\n\n";
        assert_eq!(normalize_document_text(raw), "Jane Doe Rust Go full stack engineer");
    }

    #[test]
    fn test_normalize_document_text_is_idempotent() {
        let once = normalize_document_text("  a - b \u{2022} c\t\n");
        assert_eq!(normalize_document_text(&once), once);
    }
}
