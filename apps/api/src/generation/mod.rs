// Resume Generation Engine
// Implements: summary drafting and job-description refinement of skills, experience, education.
// All LLM calls go through llm_client; no direct API calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
