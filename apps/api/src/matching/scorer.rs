//! Match Scorer — pluggable, trait-based scorer that measures one persona
//! against one job posting, producing a 0–100 compatibility score.
//!
//! Default: `RuleMatchScorer` (pure-Rust, fast, deterministic, fully testable).
//! Future: `LlmMatchScorer` (semantic via the model provider — stubbed).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>` used where a score is persisted;
//! the browse pipeline calls `score_job_for_persona` directly since it is a
//! synchronous pure computation.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::job::JobRow;
use crate::models::persona::PersonaRow;

/// Point budget per factor. The factors sum to 100 when everything matches.
const SKILL_POINTS: f64 = 40.0;
const INDUSTRY_POINTS: f64 = 20.0;
const EXPERIENCE_POINTS: f64 = 15.0;
const REMOTE_POINTS: f64 = 10.0;
const LOCATION_POINTS: f64 = 10.0;
const SALARY_POINTS: f64 = 5.0;

/// The match scorer trait. Implement this to swap backends without touching
/// handler or caller code. Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, job: &JobRow, persona: &PersonaRow) -> Result<u32, AppError>;
}

/// Rule-based scorer, the default backend. Delegates to the pure function.
pub struct RuleMatchScorer;

#[async_trait]
impl MatchScorer for RuleMatchScorer {
    async fn score(&self, job: &JobRow, persona: &PersonaRow) -> Result<u32, AppError> {
        Ok(score_job_for_persona(job, persona))
    }
}

/// Semantic scorer via the model provider. Compiles but is not the default.
pub struct LlmMatchScorer(pub LlmClient);

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score(&self, _job: &JobRow, _persona: &PersonaRow) -> Result<u32, AppError> {
        // TODO: semantic scoring via call_json once prompt quality is validated
        // against the rule scorer's output on the seeded job set.
        todo!("LLM match scorer")
    }
}

/// Computes the compatibility score between one job and one persona.
///
/// Additive point system, capped at 100, round-half-up. Missing optional
/// fields on either side skip their factor — the function is total over its
/// input domain and never errors.
///
/// Factors:
/// - skill overlap: `matched / max(job.skills.len(), 1) * 40`, where a persona
///   specialization matches if any job skill contains it as a case-insensitive
///   substring. Substring matching is intentionally loose: "React" matches
///   "React Native".
/// - industry: +20 on case-insensitive equality
/// - experience: +15 when `experience_years >= experience_required`
/// - remote: +10 when both sides are remote
/// - location: +10 when any preferred location is a substring of the job's
/// - salary: +5 when the job's band sits fully inside the preferred band
pub fn score_job_for_persona(job: &JobRow, persona: &PersonaRow) -> u32 {
    let mut total = 0.0_f64;

    if let Some(career) = persona.career() {
        if let Some(specs) = career.specializations.as_deref() {
            total += skill_overlap_points(&job.skills, specs);
        }

        if let (Some(persona_industry), Some(job_industry)) =
            (career.industry.as_deref(), job.industry.as_deref())
        {
            if persona_industry.to_lowercase() == job_industry.to_lowercase() {
                total += INDUSTRY_POINTS;
            }
        }

        if let (Some(years), Some(required)) = (career.experience_years, job.experience_required) {
            if years >= required {
                total += EXPERIENCE_POINTS;
            }
        }
    }

    if let Some(prefs) = persona.job_preferences() {
        if prefs.remote == Some(true) && job.remote {
            total += REMOTE_POINTS;
        }

        if let (Some(preferred), Some(job_location)) =
            (prefs.location.as_deref(), job.location.as_deref())
        {
            let haystack = job_location.to_lowercase();
            if preferred.iter().any(|l| haystack.contains(&l.to_lowercase())) {
                total += LOCATION_POINTS;
            }
        }

        if let (Some(range), Some(job_min), Some(job_max)) =
            (prefs.salary_range.as_ref(), job.salary_min, job.salary_max)
        {
            if job_min >= range.min && job_max <= range.max {
                total += SALARY_POINTS;
            }
        }
    }

    // All terms are non-negative, so only the upper bound needs enforcing.
    (total.round() as u32).min(100)
}

/// Skill factor: fraction of job skills covered by persona specializations,
/// scaled to 40 points. The denominator guard keeps an empty skill list from
/// dividing by zero — it yields 0 contribution regardless of the persona.
fn skill_overlap_points(job_skills: &[String], specializations: &[String]) -> f64 {
    let denominator = job_skills.len().max(1) as f64;
    let matched = specializations
        .iter()
        .filter(|spec| {
            let needle = spec.to_lowercase();
            job_skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&needle))
        })
        .count();
    matched as f64 / denominator * SKILL_POINTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::test_support::job_fixture;
    use crate::models::persona::{CareerProfile, JobPreferences, PersonaRow, SalaryRange};
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn persona_fixture(
        career: Option<CareerProfile>,
        prefs: Option<JobPreferences>,
    ) -> PersonaRow {
        PersonaRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Ada".to_string(),
            description: "Systems-minded engineer persona".to_string(),
            tone: "professional".to_string(),
            response_style: "concise".to_string(),
            career: career.map(Json),
            job_preferences: prefs.map(Json),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn full_match_job() -> JobRow {
        JobRow {
            skills: vec!["React".to_string(), "Node".to_string()],
            industry: Some("Technology".to_string()),
            experience_required: Some(3),
            remote: true,
            location: Some("Remote".to_string()),
            salary_min: Some(80_000),
            salary_max: Some(120_000),
            ..job_fixture()
        }
    }

    fn full_match_persona() -> PersonaRow {
        persona_fixture(
            Some(CareerProfile {
                specializations: Some(vec!["React".to_string()]),
                industry: Some("Technology".to_string()),
                experience_years: Some(5),
                ..CareerProfile::default()
            }),
            Some(JobPreferences {
                remote: Some(true),
                location: Some(vec!["Remote".to_string()]),
                salary_range: Some(SalaryRange {
                    min: 70_000,
                    max: 130_000,
                }),
                ..JobPreferences::default()
            }),
        )
    }

    #[test]
    fn test_scenario_a_scores_exactly_80() {
        // 40*(1/2) + 20 + 15 + 10 + 10 + 5 = 80
        let score = score_job_for_persona(&full_match_job(), &full_match_persona());
        assert_eq!(score, 80);
    }

    #[test]
    fn test_persona_without_career_scores_career_factors_zero() {
        let persona = persona_fixture(None, None);
        assert_eq!(score_job_for_persona(&full_match_job(), &persona), 0);
    }

    #[test]
    fn test_empty_job_skills_does_not_divide_by_zero() {
        let job = JobRow {
            skills: vec![],
            ..full_match_job()
        };
        let persona = persona_fixture(
            Some(CareerProfile {
                specializations: Some(vec!["React".to_string()]),
                ..CareerProfile::default()
            }),
            None,
        );
        // Skill contribution must be exactly 0, nothing else applies.
        assert_eq!(score_job_for_persona(&job, &persona), 0);
    }

    #[test]
    fn test_score_is_bounded_0_to_100() {
        let job = full_match_job();
        let persona = full_match_persona();
        let score = score_job_for_persona(&job, &persona);
        assert!(score <= 100);

        // Saturate the skill factor: every job skill covered.
        let persona_all = persona_fixture(
            Some(CareerProfile {
                specializations: Some(vec!["React".to_string(), "Node".to_string()]),
                industry: Some("Technology".to_string()),
                experience_years: Some(10),
                ..CareerProfile::default()
            }),
            persona.job_preferences().cloned(),
        );
        let score_all = score_job_for_persona(&job, &persona_all);
        assert_eq!(score_all, 100);
    }

    #[test]
    fn test_adding_matching_skill_never_decreases_score() {
        let job = full_match_job();
        let base = full_match_persona();
        let before = score_job_for_persona(&job, &base);

        let mut career = base.career().cloned().unwrap();
        career
            .specializations
            .as_mut()
            .unwrap()
            .push("Node".to_string());
        let extended = persona_fixture(Some(career), base.job_preferences().cloned());
        let after = score_job_for_persona(&job, &extended);

        assert!(after >= before, "score dropped from {before} to {after}");
    }

    #[test]
    fn test_score_is_deterministic() {
        let job = full_match_job();
        let persona = full_match_persona();
        assert_eq!(
            score_job_for_persona(&job, &persona),
            score_job_for_persona(&job, &persona)
        );
    }

    #[test]
    fn test_substring_skill_match_is_loose() {
        // Persona skill "React" must match job skill "React Native".
        let job = JobRow {
            skills: vec!["React Native".to_string()],
            ..job_fixture()
        };
        let persona = persona_fixture(
            Some(CareerProfile {
                specializations: Some(vec!["React".to_string()]),
                ..CareerProfile::default()
            }),
            None,
        );
        // 1/1 * 40 = 40
        assert_eq!(score_job_for_persona(&job, &persona), 40);
    }

    #[test]
    fn test_industry_match_is_case_insensitive_exact() {
        let job = JobRow {
            industry: Some("technology".to_string()),
            ..job_fixture()
        };
        let persona = persona_fixture(
            Some(CareerProfile {
                industry: Some("Technology".to_string()),
                ..CareerProfile::default()
            }),
            None,
        );
        assert_eq!(score_job_for_persona(&job, &persona), 20);

        // Substring is not enough for industry.
        let job_sub = JobRow {
            industry: Some("Financial Technology".to_string()),
            ..job_fixture()
        };
        assert_eq!(score_job_for_persona(&job_sub, &persona), 0);
    }

    #[test]
    fn test_experience_factor_requires_both_sides() {
        let job = JobRow {
            experience_required: Some(3),
            ..job_fixture()
        };
        let persona_without_years = persona_fixture(
            Some(CareerProfile::default()),
            None,
        );
        assert_eq!(score_job_for_persona(&job, &persona_without_years), 0);

        let persona_short = persona_fixture(
            Some(CareerProfile {
                experience_years: Some(2),
                ..CareerProfile::default()
            }),
            None,
        );
        assert_eq!(score_job_for_persona(&job, &persona_short), 0);

        let persona_exact = persona_fixture(
            Some(CareerProfile {
                experience_years: Some(3),
                ..CareerProfile::default()
            }),
            None,
        );
        assert_eq!(score_job_for_persona(&job, &persona_exact), 15);
    }

    #[test]
    fn test_remote_requires_both_sides_remote() {
        let onsite_job = JobRow {
            remote: false,
            ..job_fixture()
        };
        let persona = persona_fixture(
            None,
            Some(JobPreferences {
                remote: Some(true),
                ..JobPreferences::default()
            }),
        );
        assert_eq!(score_job_for_persona(&onsite_job, &persona), 0);

        let remote_job = JobRow {
            remote: true,
            ..job_fixture()
        };
        assert_eq!(score_job_for_persona(&remote_job, &persona), 10);
    }

    #[test]
    fn test_location_substring_match_is_case_insensitive() {
        let job = JobRow {
            location: Some("Berlin, Germany".to_string()),
            ..job_fixture()
        };
        let persona = persona_fixture(
            None,
            Some(JobPreferences {
                location: Some(vec!["berlin".to_string()]),
                ..JobPreferences::default()
            }),
        );
        assert_eq!(score_job_for_persona(&job, &persona), 10);
    }

    #[test]
    fn test_salary_containment_is_strict() {
        let persona = persona_fixture(
            None,
            Some(JobPreferences {
                salary_range: Some(SalaryRange {
                    min: 70_000,
                    max: 130_000,
                }),
                ..JobPreferences::default()
            }),
        );

        let contained = JobRow {
            salary_min: Some(80_000),
            salary_max: Some(120_000),
            ..job_fixture()
        };
        assert_eq!(score_job_for_persona(&contained, &persona), 5);

        // Job band pokes above the preferred band: no points.
        let overflowing = JobRow {
            salary_min: Some(80_000),
            salary_max: Some(140_000),
            ..job_fixture()
        };
        assert_eq!(score_job_for_persona(&overflowing, &persona), 0);

        // Half-open job bands skip the factor entirely.
        let min_only = JobRow {
            salary_min: Some(80_000),
            salary_max: None,
            ..job_fixture()
        };
        assert_eq!(score_job_for_persona(&min_only, &persona), 0);
    }

    #[test]
    fn test_exact_half_rounds_up() {
        // 16 job skills, 1 match → 40/16 = 2.5 → rounds up to 3.
        let job = JobRow {
            skills: (0..15)
                .map(|i| format!("Skill{i}"))
                .chain(std::iter::once("React".to_string()))
                .collect(),
            ..job_fixture()
        };
        let persona = persona_fixture(
            Some(CareerProfile {
                specializations: Some(vec!["React".to_string()]),
                ..CareerProfile::default()
            }),
            None,
        );
        assert_eq!(score_job_for_persona(&job, &persona), 3);
    }

    #[test]
    fn test_fractional_skill_points_are_rounded() {
        // 3 job skills, 1 match → 40/3 = 13.33… → rounds to 13.
        let job = JobRow {
            skills: vec![
                "React".to_string(),
                "Go".to_string(),
                "Kafka".to_string(),
            ],
            ..job_fixture()
        };
        let persona = persona_fixture(
            Some(CareerProfile {
                specializations: Some(vec!["React".to_string()]),
                ..CareerProfile::default()
            }),
            None,
        );
        assert_eq!(score_job_for_persona(&job, &persona), 13);

        // 4 skills, 3 matches → 30.0 exactly.
        let job4 = JobRow {
            skills: vec![
                "React".to_string(),
                "Node".to_string(),
                "Rust".to_string(),
                "Go".to_string(),
            ],
            ..job_fixture()
        };
        let persona3 = persona_fixture(
            Some(CareerProfile {
                specializations: Some(vec![
                    "React".to_string(),
                    "Node".to_string(),
                    "Rust".to_string(),
                ]),
                ..CareerProfile::default()
            }),
            None,
        );
        assert_eq!(score_job_for_persona(&job4, &persona3), 30);
    }

    #[tokio::test]
    async fn test_rule_scorer_backend_matches_pure_function() {
        let job = full_match_job();
        let persona = full_match_persona();
        let via_trait = RuleMatchScorer.score(&job, &persona).await.unwrap();
        assert_eq!(via_trait, score_job_for_persona(&job, &persona));
    }
}
