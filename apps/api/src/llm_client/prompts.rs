// Shared prompt fragments. Each module that calls the LLM keeps its own prompts.rs;
// only cross-cutting instructions live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps generated plans anchored to what the household already has.
pub const PANTRY_FIRST_INSTRUCTION: &str = "\
    CRITICAL: Build meals primarily from the listed pantry ingredients. \
    Only add ingredients that are cheap and easy to find in Indian markets, \
    and list every added ingredient in the grocery list. \
    Do NOT invent pantry items the user did not list.";
