//! Instruction prompt for AI-mode formatting.
//!
//! The model receives a single user message: the fixed rules below followed
//! by the raw extracted text, page markers included.

/// Rules sent ahead of the raw text.
pub const FORMAT_INSTRUCTIONS: &str = "Convert the following raw PDF text into well-formatted markdown.
Rules:
- Use appropriate heading levels
- Format lists properly
- Preserve code blocks if present
- Add proper spacing
- Make it readable and well-structured
- Do not output any preamble or explanation, just the markdown.";

/// Wrap extracted text in the formatting instructions.
pub fn format_prompt(raw_text: &str) -> String {
    format!("{FORMAT_INSTRUCTIONS}\n\nRaw text:\n{raw_text}")
}
