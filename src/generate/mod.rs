//! @acp:module "Generation"
//! @acp:summary "Completion service seam, prompt templating, and reply validation"
//! @acp:domain cli
//! @acp:layer service

pub mod client;
pub mod credentials;
pub mod prompt;
pub mod response;

pub use client::OpenAiClient;
pub use credentials::{resolve_api_key, secrets_path};
pub use prompt::{PromptTemplate, DEFAULT_PROMPT_TEMPLATE};
pub use response::{parse_fields, RecommendationFields};

use crate::error::Result;

/// A single chat-style completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
}

/// @acp:summary "Anything that turns a prompt into free text"
pub trait TextGenerator {
    fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        (**self).complete(request)
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        (**self).complete(request)
    }
}
