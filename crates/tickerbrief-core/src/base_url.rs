//! API root resolution for the two execution contexts.

use crate::app_config::{ApiConfig, ExecutionContext};

/// Path of the versioned API under any origin.
pub const API_PREFIX: &str = "/api/v1";

pub const DEFAULT_FALLBACK_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Resolved API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiBase {
    /// Path relative to the current origin (client context).
    Relative(String),
    /// Fully qualified root (server context).
    Absolute(String),
}

impl ApiBase {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Relative(s) | Self::Absolute(s) => s,
        }
    }
}

/// Resolve the API root from `config`.
///
/// In the client context this is always [`API_PREFIX`]. On the server the
/// deployment URL wins, then the explicit URL, then the fallback. Blank
/// values count as unset. The result depends only on `config`, so each
/// request context resolves its own root.
#[must_use]
pub fn resolve_base_url(config: &ApiConfig) -> ApiBase {
    match config.context {
        ExecutionContext::Client => ApiBase::Relative(API_PREFIX.to_string()),
        ExecutionContext::Server => {
            let non_blank = |v: &Option<String>| {
                v.as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
            };
            if let Some(deployment) = non_blank(&config.deployment_url) {
                return ApiBase::Absolute(deployment_root(&deployment));
            }
            if let Some(explicit) = non_blank(&config.explicit_url) {
                return ApiBase::Absolute(explicit);
            }
            ApiBase::Absolute(config.fallback_url.clone())
        }
    }
}

/// Hosting platforms hand out a bare host (`my-app.vercel.app`); prefix it
/// with `https://` unless a scheme is already present.
fn deployment_root(deployment: &str) -> String {
    let host = deployment.trim_end_matches('/');
    if host.contains("://") {
        format!("{host}{API_PREFIX}")
    } else {
        format!("https://{host}{API_PREFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(deployment: Option<&str>, explicit: Option<&str>) -> ApiConfig {
        ApiConfig {
            deployment_url: deployment.map(str::to_owned),
            explicit_url: explicit.map(str::to_owned),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn client_context_is_relative() {
        let config = ApiConfig {
            context: ExecutionContext::Client,
            deployment_url: Some("ignored.example.com".to_string()),
            ..ApiConfig::default()
        };
        assert_eq!(
            resolve_base_url(&config),
            ApiBase::Relative("/api/v1".to_string())
        );
    }

    #[test]
    fn server_prefers_deployment_host() {
        let config = server(Some("tickerbrief.vercel.app"), Some("http://api.local/api/v1"));
        assert_eq!(
            resolve_base_url(&config),
            ApiBase::Absolute("https://tickerbrief.vercel.app/api/v1".to_string())
        );
    }

    #[test]
    fn deployment_with_scheme_keeps_it() {
        let config = server(Some("http://preview.internal:3000/"), None);
        assert_eq!(
            resolve_base_url(&config).as_str(),
            "http://preview.internal:3000/api/v1"
        );
    }

    #[test]
    fn server_falls_back_to_explicit_url() {
        let config = server(None, Some("http://10.0.0.5:8000/api/v1"));
        assert_eq!(
            resolve_base_url(&config).as_str(),
            "http://10.0.0.5:8000/api/v1"
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = server(Some("  "), Some(""));
        assert_eq!(resolve_base_url(&config).as_str(), DEFAULT_FALLBACK_URL);
    }

    #[test]
    fn server_defaults_to_localhost() {
        assert_eq!(
            resolve_base_url(&ApiConfig::default()),
            ApiBase::Absolute("http://127.0.0.1:8000/api/v1".to_string())
        );
    }
}
