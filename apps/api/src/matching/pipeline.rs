//! Job List Filter/Sort Pipeline — annotates jobs with live match scores,
//! applies search and status filters, and produces a ranked view.
//!
//! Pure and synchronous: it operates on snapshots already fetched from the
//! store, never writes, and is re-run from scratch whenever inputs change.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::scorer::score_job_for_persona;
use crate::models::job::JobRow;
use crate::models::job_match::JobMatchRow;
use crate::models::persona::PersonaRow;

/// Minimum live score for the `high-match` filter.
pub const HIGH_MATCH_THRESHOLD: u32 = 60;

/// Which persona to score against: one of the user's personas, or the best
/// score across all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaSelection {
    All,
    One(Uuid),
}

impl PersonaSelection {
    /// Parses the `persona` query parameter. Missing or `"all"` selects the
    /// aggregate; anything else must be a persona id.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw {
            None => Ok(Self::All),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(Self::All),
            Some(s) => s
                .parse::<Uuid>()
                .map(Self::One)
                .map_err(|_| AppError::Validation(format!("invalid persona selector '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    HighMatch,
    Saved,
    Applied,
}

impl StatusFilter {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw {
            None => Ok(Self::All),
            Some("all") => Ok(Self::All),
            Some("high-match") => Ok(Self::HighMatch),
            Some("saved") => Ok(Self::Saved),
            Some("applied") => Ok(Self::Applied),
            Some(other) => Err(AppError::Validation(format!(
                "invalid status filter '{other}' (expected all, high-match, saved, applied)"
            ))),
        }
    }
}

/// A job annotated with its live score and, if the user saved it, the stored
/// JobMatch status. The score here is always computed fresh — the frozen
/// snapshot on the JobMatch row is only surfaced by the saved-jobs listing.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: JobRow,
    pub match_score: u32,
    pub match_status: Option<String>,
}

/// Runs the full pipeline: score annotation, text filter, status filter,
/// stable descending sort.
pub fn rank_jobs(
    jobs: Vec<JobRow>,
    personas: &[PersonaRow],
    matches: &[JobMatchRow],
    selection: &PersonaSelection,
    search_query: &str,
    status_filter: StatusFilter,
) -> Vec<ScoredJob> {
    let match_by_job: HashMap<Uuid, &JobMatchRow> =
        matches.iter().map(|m| (m.job_id, m)).collect();
    let query = search_query.trim().to_lowercase();

    let mut ranked: Vec<ScoredJob> = jobs
        .into_iter()
        .map(|job| {
            let match_score = annotate_score(&job, personas, selection);
            let match_status = match_by_job.get(&job.id).map(|m| m.status.clone());
            ScoredJob {
                job,
                match_score,
                match_status,
            }
        })
        .filter(|scored| query.is_empty() || matches_query(&scored.job, &query))
        .filter(|scored| passes_status_filter(scored, status_filter))
        .collect();

    // Vec::sort_by_key is stable: equal scores keep their input order.
    ranked.sort_by_key(|scored| Reverse(scored.match_score));
    ranked
}

/// Live score for one job: the selected persona's score, or the maximum over
/// all of the user's personas (0 when the user owns none).
fn annotate_score(job: &JobRow, personas: &[PersonaRow], selection: &PersonaSelection) -> u32 {
    match selection {
        PersonaSelection::All => personas
            .iter()
            .map(|p| score_job_for_persona(job, p))
            .max()
            .unwrap_or(0),
        PersonaSelection::One(id) => personas
            .iter()
            .find(|p| p.id == *id)
            .map(|p| score_job_for_persona(job, p))
            .unwrap_or(0),
    }
}

/// Case-insensitive substring search over title, company, description,
/// industry, and skills. Any field hit passes.
fn matches_query(job: &JobRow, query: &str) -> bool {
    job.title.to_lowercase().contains(query)
        || job.company.to_lowercase().contains(query)
        || job.description.to_lowercase().contains(query)
        || job
            .industry
            .as_deref()
            .map(|i| i.to_lowercase().contains(query))
            .unwrap_or(false)
        || job.skills.iter().any(|s| s.to_lowercase().contains(query))
}

fn passes_status_filter(scored: &ScoredJob, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::HighMatch => scored.match_score >= HIGH_MATCH_THRESHOLD,
        StatusFilter::Saved => scored.match_status.as_deref() == Some("saved"),
        StatusFilter::Applied => scored.match_status.as_deref() == Some("applied"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::test_support::job_fixture;
    use crate::models::persona::{CareerProfile, PersonaRow};
    use chrono::Utc;
    use sqlx::types::Json;

    fn persona_with_specs(user_id: Uuid, specs: &[&str]) -> PersonaRow {
        PersonaRow {
            id: Uuid::new_v4(),
            user_id,
            name: "Test".to_string(),
            description: String::new(),
            tone: "neutral".to_string(),
            response_style: "brief".to_string(),
            career: Some(Json(CareerProfile {
                specializations: Some(specs.iter().map(|s| s.to_string()).collect()),
                ..CareerProfile::default()
            })),
            job_preferences: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn job_with_skills(title: &str, skills: &[&str]) -> JobRow {
        JobRow {
            title: title.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..job_fixture()
        }
    }

    fn saved_match(user_id: Uuid, job_id: Uuid, status: &str) -> JobMatchRow {
        JobMatchRow {
            id: Uuid::new_v4(),
            user_id,
            persona_id: Uuid::new_v4(),
            job_id,
            match_score: Some(42),
            status: status.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_sort_is_descending_by_score() {
        let user = Uuid::new_v4();
        let personas = vec![persona_with_specs(user, &["Rust"])];
        let jobs = vec![
            job_with_skills("No match", &["Cobol"]),
            job_with_skills("Full match", &["Rust"]),
            job_with_skills("Half match", &["Rust", "Cobol"]),
        ];

        let ranked = rank_jobs(
            jobs,
            &personas,
            &[],
            &PersonaSelection::All,
            "",
            StatusFilter::All,
        );

        let titles: Vec<&str> = ranked.iter().map(|s| s.job.title.as_str()).collect();
        assert_eq!(titles, vec!["Full match", "Half match", "No match"]);
        assert_eq!(ranked[0].match_score, 40);
        assert_eq!(ranked[1].match_score, 20);
        assert_eq!(ranked[2].match_score, 0);
    }

    #[test]
    fn test_equal_scores_preserve_input_order() {
        // Four jobs, two scoring pairs. Ties must keep their relative input
        // order, not just produce a valid score ordering.
        let user = Uuid::new_v4();
        let personas = vec![persona_with_specs(user, &["Rust"])];
        let jobs = vec![
            job_with_skills("tie-a", &["Cobol"]),
            job_with_skills("winner-a", &["Rust"]),
            job_with_skills("tie-b", &["Fortran"]),
            job_with_skills("winner-b", &["Rust"]),
        ];

        let ranked = rank_jobs(
            jobs,
            &personas,
            &[],
            &PersonaSelection::All,
            "",
            StatusFilter::All,
        );

        let titles: Vec<&str> = ranked.iter().map(|s| s.job.title.as_str()).collect();
        assert_eq!(titles, vec!["winner-a", "winner-b", "tie-a", "tie-b"]);
    }

    #[test]
    fn test_high_match_filter_keeps_60_and_above() {
        // Score list [80, 55, 60, 40] must reduce to [80, 60].
        let jobs = vec![
            scored_job_fixture("eighty", 80),
            scored_job_fixture("fifty-five", 55),
            scored_job_fixture("sixty", 60),
            scored_job_fixture("forty", 40),
        ];

        let kept: Vec<&ScoredJob> = jobs
            .iter()
            .filter(|s| passes_status_filter(s, StatusFilter::HighMatch))
            .collect();
        let titles: Vec<&str> = kept.iter().map(|s| s.job.title.as_str()).collect();
        assert_eq!(titles, vec!["eighty", "sixty"]);
    }

    fn scored_job_fixture(title: &str, score: u32) -> ScoredJob {
        ScoredJob {
            job: job_with_skills(title, &[]),
            match_score: score,
            match_status: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let job = JobRow {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Ship services".to_string(),
            industry: Some("Technology".to_string()),
            skills: vec!["React".to_string()],
            ..job_fixture()
        };

        // Lowercase query must match the capitalized skill entry.
        assert!(matches_query(&job, "react"));
        assert!(matches_query(&job, "backend"));
        assert!(matches_query(&job, "acme"));
        assert!(matches_query(&job, "technology"));
        assert!(matches_query(&job, "ship"));
        assert!(!matches_query(&job, "haskell"));
    }

    #[test]
    fn test_empty_query_passes_all_jobs() {
        let jobs = vec![
            job_with_skills("one", &[]),
            job_with_skills("two", &[]),
        ];
        let ranked = rank_jobs(
            jobs,
            &[],
            &[],
            &PersonaSelection::All,
            "   ",
            StatusFilter::All,
        );
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_saved_and_applied_filters_use_job_matches() {
        let user = Uuid::new_v4();
        let saved_job = job_with_skills("saved one", &[]);
        let applied_job = job_with_skills("applied one", &[]);
        let plain_job = job_with_skills("plain", &[]);
        let matches = vec![
            saved_match(user, saved_job.id, "saved"),
            saved_match(user, applied_job.id, "applied"),
        ];
        let jobs = vec![saved_job, applied_job, plain_job];

        let saved = rank_jobs(
            jobs.clone(),
            &[],
            &matches,
            &PersonaSelection::All,
            "",
            StatusFilter::Saved,
        );
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].job.title, "saved one");
        assert_eq!(saved[0].match_status.as_deref(), Some("saved"));

        let applied = rank_jobs(
            jobs,
            &[],
            &matches,
            &PersonaSelection::All,
            "",
            StatusFilter::Applied,
        );
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].job.title, "applied one");
    }

    #[test]
    fn test_all_personas_takes_maximum_score() {
        let user = Uuid::new_v4();
        let weak = persona_with_specs(user, &["Cobol"]);
        let strong = persona_with_specs(user, &["Rust"]);
        let job = job_with_skills("rust role", &["Rust"]);

        let ranked = rank_jobs(
            vec![job],
            &[weak, strong],
            &[],
            &PersonaSelection::All,
            "",
            StatusFilter::All,
        );
        assert_eq!(ranked[0].match_score, 40);
    }

    #[test]
    fn test_no_personas_scores_zero() {
        let job = job_with_skills("anything", &["Rust"]);
        let ranked = rank_jobs(
            vec![job],
            &[],
            &[],
            &PersonaSelection::All,
            "",
            StatusFilter::All,
        );
        assert_eq!(ranked[0].match_score, 0);
    }

    #[test]
    fn test_single_persona_selection_scores_that_persona_only() {
        let user = Uuid::new_v4();
        let weak = persona_with_specs(user, &["Cobol"]);
        let strong = persona_with_specs(user, &["Rust"]);
        let weak_id = weak.id;
        let job = job_with_skills("rust role", &["Rust"]);

        let ranked = rank_jobs(
            vec![job],
            &[weak, strong],
            &[],
            &PersonaSelection::One(weak_id),
            "",
            StatusFilter::All,
        );
        assert_eq!(ranked[0].match_score, 0);
    }

    #[test]
    fn test_unknown_persona_selection_scores_zero() {
        let user = Uuid::new_v4();
        let personas = vec![persona_with_specs(user, &["Rust"])];
        let job = job_with_skills("rust role", &["Rust"]);

        let ranked = rank_jobs(
            vec![job],
            &personas,
            &[],
            &PersonaSelection::One(Uuid::new_v4()),
            "",
            StatusFilter::All,
        );
        assert_eq!(ranked[0].match_score, 0);
    }

    #[test]
    fn test_persona_selection_parse() {
        assert_eq!(PersonaSelection::parse(None).unwrap(), PersonaSelection::All);
        assert_eq!(
            PersonaSelection::parse(Some("all")).unwrap(),
            PersonaSelection::All
        );
        let id = Uuid::new_v4();
        assert_eq!(
            PersonaSelection::parse(Some(&id.to_string())).unwrap(),
            PersonaSelection::One(id)
        );
        assert!(PersonaSelection::parse(Some("not-a-uuid")).is_err());
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse(None).unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("high-match")).unwrap(),
            StatusFilter::HighMatch
        );
        assert_eq!(StatusFilter::parse(Some("saved")).unwrap(), StatusFilter::Saved);
        assert_eq!(
            StatusFilter::parse(Some("applied")).unwrap(),
            StatusFilter::Applied
        );
        assert!(StatusFilter::parse(Some("archived")).is_err());
    }
}
