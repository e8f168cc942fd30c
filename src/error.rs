//! Error types for EchoDraft.

/// Top-level error type for the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Generation error: {0}")]
    Generate(#[from] GenerateError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classification boundary errors.
///
/// `Parse` is recoverable — the routing engine substitutes a safe REVIEW
/// decision and proceeds. Everything else is fatal for the invocation.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Could not parse structured triage response: {0}")]
    Parse(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Generation boundary errors. Always fatal for the invocation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Draft generation failed: {0}")]
    Draft(String),

    #[error("Explanation generation failed: {0}")]
    Explain(String),

    #[error("Revision failed: {0}")]
    Revise(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Storage errors for the review queue and rule store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record {key} failed to serialize: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for the pipeline.
pub type Result<T> = std::result::Result<T, Error>;
