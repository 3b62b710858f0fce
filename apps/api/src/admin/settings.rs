//! Global AI settings storage. A single row (`id = 1`) holds the model and
//! sampling parameters every LLM-backed endpoint uses.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::settings::AiSettingsRow;

/// Loads the global AI settings, falling back to defaults when the row has
/// never been written.
pub async fn load_ai_settings(pool: &PgPool) -> Result<AiSettingsRow, AppError> {
    let row = sqlx::query_as::<_, AiSettingsRow>("SELECT * FROM ai_settings WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.unwrap_or_default())
}

/// Upserts the global AI settings row.
pub async fn store_ai_settings(
    pool: &PgPool,
    model: &str,
    temperature: f64,
    max_tokens: i32,
    system_prompt: &str,
) -> Result<AiSettingsRow, AppError> {
    let row = sqlx::query_as::<_, AiSettingsRow>(
        r#"
        INSERT INTO ai_settings (id, model, temperature, max_tokens, system_prompt)
        VALUES (1, $1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
            SET model = EXCLUDED.model,
                temperature = EXCLUDED.temperature,
                max_tokens = EXCLUDED.max_tokens,
                system_prompt = EXCLUDED.system_prompt,
                updated_at = now()
        RETURNING *
        "#,
    )
    .bind(model)
    .bind(temperature)
    .bind(max_tokens)
    .bind(system_prompt)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
