use anyhow::Result;
use college_finder::{
    CollegeRecord, EngineConfig, Finder, FinderError, LocalStorage, RecommendationEngine,
    RecommendationReport, ReportFormat,
};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

fn names(colleges: &[CollegeRecord]) -> Vec<&str> {
    colleges.iter().map(|c| c.name.as_str()).collect()
}

#[tokio::test]
async fn test_end_to_end_small_dataset() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_csv(
        &temp_dir,
        "colleges.csv",
        "name,acceptance_rate,average_score,domain\nA,10,1200,a.edu\nB,20,1300\nC,30,1250,c.edu\nD,15,1210\n",
    );

    let finder = Finder::new(LocalStorage::new(temp_dir.path()), EngineConfig::default());
    let recommendation = finder.run("colleges.csv", 1220).await?;

    assert_eq!(names(&recommendation.colleges), vec!["D", "A", "C", "B"]);
    assert_eq!(recommendation.colleges[1].domain, "a.edu");
    assert!(recommendation.exhausted);
    Ok(())
}

#[tokio::test]
async fn test_malformed_rows_are_dropped_not_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut content = String::from("name,acceptance_rate,average_score\n");
    for i in 0..9 {
        content.push_str(&format!("Valid {},{},{}\n", i, 20 + i, 1150 + i * 10));
    }
    content.push_str("Broken,twenty,1200\n");
    write_csv(&temp_dir, "colleges.csv", &content);

    let finder = Finder::new(LocalStorage::new(temp_dir.path()), EngineConfig::default());
    let load = finder.load("colleges.csv").await?;

    assert_eq!(load.records.len(), 9);
    assert_eq!(load.skipped.len(), 1);
    assert!(load.records.iter().all(|c| c.name != "Broken"));
    Ok(())
}

#[tokio::test]
async fn test_header_only_file_is_empty_dataset() {
    let temp_dir = TempDir::new().unwrap();
    write_csv(&temp_dir, "colleges.csv", "name,acceptance_rate,average_score\n");

    let finder = Finder::new(LocalStorage::new(temp_dir.path()), EngineConfig::default());
    let err = finder.run("colleges.csv", 1200).await.unwrap_err();

    assert!(matches!(err, FinderError::EmptyDataset { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_missing_file_is_source_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let finder = Finder::new(LocalStorage::new(temp_dir.path()), EngineConfig::default());

    let err = finder.run("does-not-exist.csv", 1200).await.unwrap_err();
    assert!(matches!(err, FinderError::SourceUnavailable { .. }));
}

#[tokio::test]
async fn test_bundled_dataset_produces_full_shortlist() -> Result<()> {
    let finder = Finder::new(
        LocalStorage::new(env!("CARGO_MANIFEST_DIR")),
        EngineConfig::default(),
    );
    let load = finder.load("data/colleges.csv").await?;
    assert!(load.records.len() >= 30);
    assert!(load.skipped.is_empty());

    for target in [400, 1000, 1220, 1400, 1600] {
        let recommendation = finder.engine().recommend_detailed(&load.records, target);
        assert_eq!(recommendation.colleges.len(), 10, "target {}", target);
        for college in &recommendation.colleges {
            assert!(college.score_distance(target) <= recommendation.final_buffer);
        }
    }
    Ok(())
}

#[test]
fn test_engine_shared_across_threads() {
    let records = college_finder::load_from_bytes(
        b"name,acceptance_rate,average_score\nA,10,1200\nB,20,1300\nC,30,1250\nD,15,1210\n",
        "inline",
    )
    .unwrap()
    .records;
    let records = std::sync::Arc::new(records);
    let engine = std::sync::Arc::new(RecommendationEngine::default());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let records = std::sync::Arc::clone(&records);
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || engine.recommend(&records, 1220))
        })
        .collect();

    for handle in handles {
        let ranked = handle.join().unwrap();
        assert_eq!(names(&ranked), vec!["D", "A", "C", "B"]);
    }
}

#[tokio::test]
async fn test_report_written_through_storage() -> Result<()> {
    use college_finder::domain::ports::Storage;

    let temp_dir = TempDir::new()?;
    write_csv(
        &temp_dir,
        "colleges.csv",
        "name,acceptance_rate,average_score\nA,10,1200\nB,20,1300\n",
    );
    let storage = LocalStorage::new(temp_dir.path());
    let finder = Finder::new(storage.clone(), EngineConfig::default());

    let recommendation = finder.run("colleges.csv", 1290).await?;
    let report = RecommendationReport::new("colleges.csv", 0, &recommendation);
    storage
        .write_file("out/report.json", report.render(ReportFormat::Json)?.as_bytes())
        .await?;

    let written = std::fs::read_to_string(temp_dir.path().join("out/report.json"))?;
    let json: serde_json::Value = serde_json::from_str(&written)?;
    assert_eq!(json["colleges"][0]["name"], "B");
    assert_eq!(json["colleges"][0]["rank"], 1);
    assert!(json["generated_at"].is_string());
    Ok(())
}
