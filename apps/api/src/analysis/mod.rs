// Optional enrichment: domain classification, detail extraction, qualitative narrative.
// Every model call here resolves to an `Outcome` and never fails the request.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod details;
pub mod domain;
pub mod narrative;
pub mod outcome;
pub mod patterns;
pub mod prompts;
