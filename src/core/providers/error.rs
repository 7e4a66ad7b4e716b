//! Unified provider error type
//!
//! One error enum for every speech backend. Adapters construct these via
//! the factory methods; the dispatcher classifies them for the aggregated
//! failure detail. Messages must never embed request URLs or credentials.

use thiserror::Error;

use crate::core::types::AttemptClassification;

/// Per-attempt provider failure
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Required credentials are absent; the provider is skipped, not tried
    #[error("{provider} is not configured")]
    NotConfigured { provider: &'static str },

    /// Provider signaled quota exhaustion in its error payload
    #[error("Quota exceeded for {provider}: {message}")]
    QuotaExceeded {
        provider: &'static str,
        message: String,
    },

    /// The provider could not be reached
    #[error("Network error for {provider}: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    /// The provider was reached but returned a non-success response
    #[error("API error for {provider} (status {status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// The provider reported success with an unusable payload
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn not_configured(provider: &'static str) -> Self {
        Self::NotConfigured { provider }
    }

    pub fn quota_exceeded(provider: &'static str, message: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            provider,
            message: message.into(),
        }
    }

    pub fn transport(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            provider,
            message: message.into(),
        }
    }

    pub fn api(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(provider: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider,
            message: message.into(),
        }
    }

    /// Provider the failure belongs to
    pub fn provider(&self) -> &'static str {
        match self {
            Self::NotConfigured { provider }
            | Self::QuotaExceeded { provider, .. }
            | Self::Transport { provider, .. }
            | Self::Api { provider, .. }
            | Self::InvalidResponse { provider, .. } => provider,
        }
    }

    /// Wire classification for logs and the aggregated failure detail
    pub fn classification(&self) -> AttemptClassification {
        match self {
            Self::NotConfigured { .. } => AttemptClassification::NotConfigured,
            Self::QuotaExceeded { .. } => AttemptClassification::QuotaExceeded,
            Self::Transport { .. } => AttemptClassification::TransportError,
            Self::Api { .. } | Self::InvalidResponse { .. } => {
                AttemptClassification::ProviderError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_mapping() {
        assert_eq!(
            ProviderError::not_configured("polly").classification(),
            AttemptClassification::NotConfigured
        );
        assert_eq!(
            ProviderError::quota_exceeded("elevenlabs", "exhausted").classification(),
            AttemptClassification::QuotaExceeded
        );
        assert_eq!(
            ProviderError::transport("google", "connection refused").classification(),
            AttemptClassification::TransportError
        );
        assert_eq!(
            ProviderError::api("google", 500, "server error").classification(),
            AttemptClassification::ProviderError
        );
        assert_eq!(
            ProviderError::invalid_response("polly", "expected audio, got text/html")
                .classification(),
            AttemptClassification::ProviderError
        );
    }

    #[test]
    fn provider_accessor() {
        assert_eq!(ProviderError::api("elevenlabs", 401, "denied").provider(), "elevenlabs");
    }
}
