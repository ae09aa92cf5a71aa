// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file only holds the pieces they have in common.

/// Opening line for every resume prompt.
pub const RESUME_ASSISTANT: &str = "You are an expert resume editor.";

/// Instruction that forces a bare JSON array as output.
pub const JSON_ARRAY_ONLY: &str = "\
- DO NOT include markdown, commentary, or extra text
- DO NOT wrap the response in quotes or say \"Here's your updated resume\"
- Output raw JSON only";

/// Appends a labelled block (`Label:\n<body>`) to a prompt.
pub fn labelled(prompt: &mut String, label: &str, body: &str) {
    prompt.push_str("\n\n");
    prompt.push_str(label);
    prompt.push_str(":\n");
    prompt.push_str(body.trim());
}
