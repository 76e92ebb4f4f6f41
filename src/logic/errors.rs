use thiserror::Error;

/// Failure of a remote catalog request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure, timeout or unexpected response. Recoverable via retry.
    #[error("{0}")]
    Network(String),

    /// The request was superseded or torn down. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,

    /// The single-item target does not exist
    #[error("character not found")]
    NotFound,
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

/// Classify a transport error into the fetch taxonomy.
///
/// Status codes are mapped by the response decoders, so every transport
/// error here is a `Network` failure.
pub fn classify_error(error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        return FetchError::Network(format!("request timed out: {}", format_error_message(error)));
    }

    FetchError::Network(format_error_message(error))
}

/// Format error message for display - walks the source chain to the root cause
pub fn format_error_message(error: &(dyn std::error::Error + 'static)) -> String {
    let mut deepest = error.to_string();
    let mut source = error.source();

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    deepest
}

/// Human-readable message for the list error state
pub fn user_message(error: &FetchError) -> String {
    match error {
        FetchError::Network(detail) => format!("Failed to load characters: {}", detail),
        FetchError::NotFound => "Character not found".to_string(),
        FetchError::Cancelled => String::new(),
    }
}
