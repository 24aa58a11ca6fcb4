use clap::Parser;
use college_finder::app::prompt::prompt_for_score;
use college_finder::app::report::{RecommendationReport, ReportFormat};
use college_finder::domain::ports::Storage;
use college_finder::utils::error::{FinderError, Result};
use college_finder::utils::validation::{validate_target_score, Validate};
use college_finder::utils::logger;
use college_finder::{
    CliConfig, EnrichmentCache, EnrichmentDispatcher, Finder, FinderConfig, HttpLogoEnricher,
    LocalStorage,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting college-finder");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ college-finder failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    let config = cli.resolve()?;
    config.validate()?;

    let bounds = config.score_bounds();
    let score = match &cli.score {
        Some(raw) => validate_target_score(raw, bounds)?,
        None => {
            println!("welcome to the college finder.\ninput your sat score and i will recommend you colleges.");
            let stdin = std::io::stdin();
            prompt_for_score(stdin.lock(), std::io::stdout(), bounds)?
        }
    };

    let storage = LocalStorage::default();
    let finder = Finder::new(storage.clone(), config.engine);
    let load = finder.load(&config.data.path).await?;
    let recommendation = finder.engine().recommend_detailed(&load.records, score);

    tracing::info!(
        "✅ {} recommendations for {} (band ±{}, {} candidates)",
        recommendation.colleges.len(),
        score,
        recommendation.final_buffer,
        recommendation.candidate_count
    );

    let mut report = RecommendationReport::new(&config.data.path, load.skipped.len(), &recommendation);

    // 文字模式直接輸出排名，補充資料到達時再逐行顯示
    let stream_text = config.output.path.is_none() && config.output.format == ReportFormat::Text;
    if stream_text {
        print!("{}", report.render_text());
    }

    if config.enrichment.enabled {
        enrich_report(&config, &mut report, stream_text).await?;
    }

    let rendered = report.render(config.output.format)?;
    match &config.output.path {
        Some(path) => {
            storage.write_file(path, rendered.as_bytes()).await?;
            tracing::info!("📁 Report saved to: {}", path);
            println!("📁 Report saved to: {}", path);
        }
        None if stream_text => {}
        None => print!("{}", rendered),
    }

    Ok(())
}

async fn enrich_report(
    config: &FinderConfig,
    report: &mut RecommendationReport,
    stream_text: bool,
) -> Result<()> {
    let enricher = HttpLogoEnricher::new(&config.enrichment.logo_endpoint)?;
    let dispatcher = EnrichmentDispatcher::new(
        enricher,
        config.enrichment.concurrency,
        EnrichmentCache::new(),
    );

    let colleges: Vec<_> = report.colleges.iter().map(|row| row.college.clone()).collect();
    let mut pending = dispatcher.dispatch(&colleges);

    while let Some(update) = pending.next_update().await {
        if let Err(e) = &update.outcome {
            log_enrichment_failure(&update.key.name, e);
            continue;
        }
        if let Some(row) = report.apply_update(&update) {
            if stream_text {
                println!("  ↳ {}", row.text_line());
            }
        }
    }

    Ok(())
}

fn log_enrichment_failure(name: &str, error: &FinderError) {
    match error {
        FinderError::MissingDomain { .. } => tracing::debug!("No domain for {}, skipping logo", name),
        other => tracing::warn!("⚠️ Logo lookup failed for {}: {}", name, other),
    }
}
