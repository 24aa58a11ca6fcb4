pub mod engine;
pub mod enrichment;
pub mod finder;
pub mod loader;

pub use crate::domain::model::{CollegeRecord, Enrichment, LoadReport, Recommendation, RecordSet};
pub use crate::domain::ports::{Enricher, Storage};
pub use crate::utils::error::Result;
