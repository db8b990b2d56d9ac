//! Shared data model and pure derivations for ticker sentiment briefs.
//!
//! Everything here is synchronous and side-effect free apart from
//! [`load_app_config`], which reads the process environment.

pub mod app_config;
pub mod base_url;
pub mod config;
pub mod display;
pub mod error;
pub mod metrics;
pub mod partition;
pub mod period;
pub mod symbol;
pub mod types;

pub use app_config::{ApiConfig, AppConfig, ExecutionContext};
pub use base_url::{resolve_base_url, ApiBase, API_PREFIX, DEFAULT_FALLBACK_URL};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use metrics::{
    classify_options_flow, classify_safety, compare_volume, OptionsFlow, SafetyLevel, Tone,
    VolumeComparison, VolumeDirection,
};
pub use partition::{partition_articles, SentimentPartition};
pub use period::HistoryPeriod;
pub use symbol::normalize_symbol;
pub use types::{
    Article, ArticleSentiment, InsiderTransaction, PoliticianTrade, PricePoint, Stance,
    TickerBrief,
};
