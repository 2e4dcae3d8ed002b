pub mod ai_service;
pub mod config_store;
pub mod credentials;
pub mod food_log;
pub mod openrouter; // OpenRouter chat completions
pub mod prompt;
pub mod transport; // Attribution headers for OpenRouter

pub use ai_service::ChatCompletion;
pub use config_store::ConfigStore;
pub use credentials::CredentialResolver;
pub use openrouter::OpenRouterService;
pub use prompt::TerminalPrompter;
pub use transport::{AttributionTransport, HttpTransport, Transport};
