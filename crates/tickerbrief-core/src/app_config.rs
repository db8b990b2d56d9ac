/// Where the API client runs, which decides how the base URL is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    /// In-browser: requests go to the page's own origin.
    Client,
    /// Pre-render / server side: requests need an absolute URL.
    #[default]
    Server,
}

impl std::fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionContext::Client => write!(f, "client"),
            ExecutionContext::Server => write!(f, "server"),
        }
    }
}

/// Settings injected into the API client at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub context: ExecutionContext,
    /// Origin of the current page (`https://example.com`). Anchors the
    /// relative API path in the client context.
    pub client_origin: Option<String>,
    /// Deployment host provided by the hosting platform, with or without
    /// a scheme.
    pub deployment_url: Option<String>,
    /// Explicitly configured API root, used verbatim.
    pub explicit_url: Option<String>,
    /// Last resort API root for local development.
    pub fallback_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// How long a successfully fetched trending list may be reused.
    pub trending_revalidate_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            context: ExecutionContext::Server,
            client_origin: None,
            deployment_url: None,
            explicit_url: None,
            fallback_url: crate::base_url::DEFAULT_FALLBACK_URL.to_string(),
            request_timeout_secs: 30,
            user_agent: "tickerbrief/0.1".to_string(),
            trending_revalidate_secs: 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub log_level: String,
}
