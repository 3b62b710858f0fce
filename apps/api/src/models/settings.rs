use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::llm_client::{GenerationParams, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// Global AI settings, a singleton row (`id = 1`) editable by administrators.
/// Every LLM-backed endpoint reads these before calling the provider.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AiSettingsRow {
    pub id: i32,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i32,
    pub system_prompt: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for AiSettingsRow {
    fn default() -> Self {
        Self {
            id: 1,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: DEFAULT_MAX_TOKENS as i32,
            system_prompt: String::new(),
            updated_at: Utc::now(),
        }
    }
}

impl AiSettingsRow {
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens.max(1) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_use_default_model() {
        let settings = AiSettingsRow::default();
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.id, 1);
    }

    #[test]
    fn test_generation_params_clamps_max_tokens() {
        let settings = AiSettingsRow {
            max_tokens: -5,
            ..AiSettingsRow::default()
        };
        assert_eq!(settings.generation_params().max_tokens, 1);
    }
}
