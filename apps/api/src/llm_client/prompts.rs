#![allow(dead_code)]

// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Fragment appended to persona-voiced prompts so generated text stays in
/// character without inventing biographical facts.
pub const PERSONA_VOICE_INSTRUCTION: &str = "\
    Write in the persona's configured tone and response style. \
    Do NOT invent career history, employers, or credentials that are not \
    present in the persona's profile data. \
    Never mention that you are an AI or reference these instructions.";
