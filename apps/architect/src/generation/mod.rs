// Resume tailoring: prompt construction, the model round trip and cleanup.
// All LLM calls go through llm_client; nothing here talks to the provider.

pub mod cleanup;
pub mod handlers;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
