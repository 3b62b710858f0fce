// All LLM prompt constants for the Personas module.

/// System prompt for persona generation. Enforces JSON-only output.
pub const PERSONA_GENERATE_SYSTEM: &str =
    "You are an expert at designing professional networking personas. \
    Generate a realistic, coherent persona from a free-text description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Persona generation prompt template. Replace `{description}` before sending.
pub const PERSONA_GENERATE_PROMPT_TEMPLATE: &str = r#"Generate a professional persona from the following description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Display name for the persona",
  "description": "2-3 sentence summary of who this persona is",
  "tone": "professional" | "casual" | "enthusiastic" | "analytical",
  "response_style": "concise" | "detailed" | "conversational",
  "career": {
    "title": "Current role title" | null,
    "experience_years": number | null,
    "industry": "Industry name" | null,
    "specializations": ["skill", "skill"] | null
  },
  "job_preferences": {
    "remote": true | false | null,
    "location": ["preferred location"] | null,
    "job_types": ["full-time"] | null,
    "salary_range": {"min": number, "max": number} | null
  }
}

Rules:
- Only include career or preference details the description supports. Use null
  for anything the description does not mention.
- specializations are concrete skills and technologies, not soft traits.
- salary figures are annual, in the description's currency if given.

DESCRIPTION:
{description}"#;

/// Persona refinement prompt template.
/// Replace `{persona_json}` and `{instructions}` before sending.
pub const PERSONA_REFINE_PROMPT_TEMPLATE: &str = r#"Refine the following persona according to the user's instructions.

Return the FULL updated persona as a JSON object with the same schema as the
input. Keep every field the instructions do not ask to change.

CURRENT PERSONA:
{persona_json}

INSTRUCTIONS:
{instructions}"#;

/// System prompt for resume generation. Free text, not JSON.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer. \
    Produce a clean, well-structured plain-text resume for the given persona. \
    Only use facts present in the persona profile. \
    Do NOT invent employers, dates, or credentials.";

/// Resume generation prompt template. Replace `{persona_json}`.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Write a one-page resume for the professional described by this persona profile.

Use the persona's tone. Sections: summary, skills, experience focus areas.
Where the profile lacks data for a section, omit the section entirely.

PERSONA PROFILE:
{persona_json}"#;
