pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpLogoEnricher, storage::LocalStorage};
pub use app::report::{RecommendationReport, ReportFormat};
pub use config::FinderConfig;
pub use core::engine::{EngineConfig, RecommendationEngine};
pub use core::enrichment::{EnrichmentCache, EnrichmentDispatcher, EnrichmentRun, EnrichmentUpdate};
pub use core::finder::Finder;
pub use core::loader::{load_from_bytes, load_from_reader, RecordLoader};
pub use domain::model::{CollegeRecord, Enrichment, LoadReport, Recommendation, RecordKey, RecordSet};
pub use utils::error::{FinderError, Result};
