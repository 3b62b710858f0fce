// All LLM prompt constants for the Chat module.

/// System prompt template for persona auto-replies.
/// Replace `{persona_name}`, `{tone}`, `{response_style}`, `{description}`.
pub const AUTO_REPLY_SYSTEM_TEMPLATE: &str = "\
You are replying in a professional networking chat as the persona '{persona_name}'. \
Persona description: {description} \
Tone: {tone}. Response style: {response_style}. \
Reply with the message text only — no quotes, no preamble, no sign-off \
unless the persona's style calls for one.";

/// Auto-reply prompt template. Replace `{history}` with the rendered
/// conversation transcript.
pub const AUTO_REPLY_PROMPT_TEMPLATE: &str = r#"Continue this conversation with a single reply from the persona's side.

CONVERSATION SO FAR (oldest first, "them" is the other participant, "me" is the persona's owner):
{history}

Write the persona's next reply."#;
