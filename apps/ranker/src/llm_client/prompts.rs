// Shared prompt fragments.
// Category prompts live in scoring/prompts.rs; this file holds cross-cutting pieces.

/// Appended to every category prompt when structured output is enabled.
/// The textual format block above it stays in place so the fallback parser
/// still has labels to find.
pub const STRUCTURED_OUTPUT_INSTRUCTION: &str = "\
Respond with a single JSON object and nothing else: \
{\"score\": <integer 0-100>, \"explanation\": \"<why this score was assigned>\"}. \
Do NOT use markdown code fences.";
