//! LLM-backed persona generation and refinement.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{GenerationParams, LlmClient};
use crate::models::persona::{CareerProfile, JobPreferences, PersonaRow};
use crate::personas::prompts::{
    PERSONA_GENERATE_PROMPT_TEMPLATE, PERSONA_GENERATE_SYSTEM, PERSONA_REFINE_PROMPT_TEMPLATE,
    RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM,
};

/// Structured persona draft returned by the model. Not yet persisted — the
/// caller decides whether to insert or update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPersona {
    pub name: String,
    pub description: String,
    pub tone: String,
    pub response_style: String,
    pub career: Option<CareerProfile>,
    pub job_preferences: Option<JobPreferences>,
}

/// Generates a persona draft from a free-text description.
pub async fn generate_persona(
    llm: &LlmClient,
    params: &GenerationParams,
    description: &str,
) -> Result<GeneratedPersona, AppError> {
    let prompt = PERSONA_GENERATE_PROMPT_TEMPLATE.replace("{description}", description);
    llm.call_json::<GeneratedPersona>(&prompt, PERSONA_GENERATE_SYSTEM, params)
        .await
        .map_err(|e| AppError::Llm(format!("Persona generation failed: {e}")))
}

/// Refines an existing persona according to free-text instructions, returning
/// the full updated draft.
pub async fn refine_persona(
    llm: &LlmClient,
    params: &GenerationParams,
    persona: &PersonaRow,
    instructions: &str,
) -> Result<GeneratedPersona, AppError> {
    let persona_json = serde_json::to_string_pretty(persona)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("persona serialization failed: {e}")))?;
    let prompt = PERSONA_REFINE_PROMPT_TEMPLATE
        .replace("{persona_json}", &persona_json)
        .replace("{instructions}", instructions);
    llm.call_json::<GeneratedPersona>(&prompt, PERSONA_GENERATE_SYSTEM, params)
        .await
        .map_err(|e| AppError::Llm(format!("Persona refinement failed: {e}")))
}

/// Generates a plain-text resume for a persona.
pub async fn generate_resume(
    llm: &LlmClient,
    params: &GenerationParams,
    persona: &PersonaRow,
) -> Result<String, AppError> {
    let persona_json = serde_json::to_string_pretty(persona)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("persona serialization failed: {e}")))?;
    let prompt = RESUME_PROMPT_TEMPLATE.replace("{persona_json}", &persona_json);
    llm.call_text(&prompt, RESUME_SYSTEM, params)
        .await
        .map_err(|e| AppError::Llm(format!("Resume generation failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_persona_deserializes_with_nulls() {
        let json = r#"{
            "name": "Maya",
            "description": "A pragmatic backend engineer persona.",
            "tone": "professional",
            "response_style": "concise",
            "career": {
                "title": "Backend Engineer",
                "experience_years": 6,
                "industry": "Technology",
                "specializations": ["Rust", "PostgreSQL"]
            },
            "job_preferences": null
        }"#;
        let draft: GeneratedPersona = serde_json::from_str(json).unwrap();
        assert_eq!(draft.name, "Maya");
        assert!(draft.job_preferences.is_none());
        let career = draft.career.unwrap();
        assert_eq!(career.experience_years, Some(6));
        assert_eq!(career.specializations.unwrap().len(), 2);
    }

    #[test]
    fn test_generate_prompt_template_has_placeholder() {
        assert!(PERSONA_GENERATE_PROMPT_TEMPLATE.contains("{description}"));
        assert!(PERSONA_REFINE_PROMPT_TEMPLATE.contains("{persona_json}"));
        assert!(PERSONA_REFINE_PROMPT_TEMPLATE.contains("{instructions}"));
    }
}
