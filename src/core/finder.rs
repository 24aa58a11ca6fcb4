use crate::core::engine::{EngineConfig, RecommendationEngine};
use crate::core::loader::RecordLoader;
use crate::domain::model::{LoadReport, Recommendation};
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// Loads a college list and ranks it for a target score.
pub struct Finder<S: Storage> {
    loader: RecordLoader<S>,
    engine: RecommendationEngine,
}

impl<S: Storage> Finder<S> {
    pub fn new(storage: S, config: EngineConfig) -> Self {
        Self {
            loader: RecordLoader::new(storage),
            engine: RecommendationEngine::new(config),
        }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub async fn load(&self, path: &str) -> Result<LoadReport> {
        tracing::info!("📥 Loading colleges from {}", path);
        self.loader.load(path).await
    }

    pub async fn run(&self, path: &str, target_score: i64) -> Result<Recommendation> {
        let report = self.load(path).await?;

        tracing::info!("🎯 Ranking {} colleges for score {}", report.records.len(), target_score);
        let recommendation = self.engine.recommend_detailed(&report.records, target_score);

        tracing::info!(
            "✅ {} recommendations (band ±{}, {} candidates)",
            recommendation.colleges.len(),
            recommendation.final_buffer,
            recommendation.candidate_count
        );
        Ok(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FinderError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                FinderError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_run_loads_and_ranks() {
        let storage = MockStorage::default();
        storage
            .write_file(
                "colleges.csv",
                b"name,acceptance_rate,average_score\nA,10,1200\nB,20,1300\nC,30,1250\nD,15,1210\nE,oops,1220\n",
            )
            .await
            .unwrap();

        let finder = Finder::new(storage, EngineConfig::default());
        let recommendation = finder.run("colleges.csv", 1220).await.unwrap();

        let names: Vec<&str> = recommendation
            .colleges
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["D", "A", "C", "B"]);
        assert_eq!(recommendation.target_score, 1220);
    }

    #[tokio::test]
    async fn test_run_propagates_empty_dataset() {
        let storage = MockStorage::default();
        storage
            .write_file("empty.csv", b"name,acceptance_rate,average_score\n")
            .await
            .unwrap();

        let finder = Finder::new(storage, EngineConfig::default());
        let err = finder.run("empty.csv", 1200).await.unwrap_err();
        assert!(matches!(err, FinderError::EmptyDataset { .. }));
    }
}
