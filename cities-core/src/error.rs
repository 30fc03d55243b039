use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between logging in and having a city list.
///
/// The loader treats every variant the same way; the split exists for logs
/// and for callers that use [`crate::CityApi`] directly.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Login failed with status {status}: {body}")]
    Authentication { status: StatusCode, body: String },

    #[error("Login failed: response did not contain a token")]
    MissingToken,

    #[error("Failed to fetch cities with status {status}: {body}")]
    Fetch { status: StatusCode, body: String },

    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse {what} JSON")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, LoadError::Authentication { .. } | LoadError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_message_mentions_login() {
        let err = LoadError::Authentication {
            status: StatusCode::UNAUTHORIZED,
            body: "bad credentials".into(),
        };

        assert!(err.is_authentication());
        assert!(err.to_string().starts_with("Login failed"));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn fetch_is_not_authentication() {
        let err =
            LoadError::Fetch { status: StatusCode::INTERNAL_SERVER_ERROR, body: String::new() };

        assert!(!err.is_authentication());
        assert!(err.to_string().starts_with("Failed to fetch cities"));
    }

    #[test]
    fn missing_token_is_authentication() {
        assert!(LoadError::MissingToken.is_authentication());
    }
}
