// Job descriptions: stored per user, entered manually or drafted by the LLM.
// Their text is the reference document of a match run.

pub mod generator;
pub mod handlers;
pub mod prompts;
