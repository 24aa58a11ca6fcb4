use crate::app::report::ReportFormat;
use crate::config::toml_config::FinderConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "college-finder")]
#[command(about = "Recommend colleges whose average score is closest to yours")]
pub struct CliConfig {
    /// CSV with name,acceptance_rate,average_score[,domain] rows
    #[arg(long)]
    pub data: Option<String>,

    /// Target score; prompts on stdin when omitted
    #[arg(short, long)]
    pub score: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub initial_buffer: Option<u64>,

    #[arg(long)]
    pub widen_step: Option<u64>,

    #[arg(long)]
    pub min_candidates: Option<usize>,

    #[arg(long)]
    pub max_results: Option<usize>,

    /// Lowest accepted target score
    #[arg(long, allow_hyphen_values = true)]
    pub min_score: Option<i64>,

    /// Highest accepted target score
    #[arg(long, allow_hyphen_values = true)]
    pub max_score: Option<i64>,

    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Look up a logo for each recommended college
    #[arg(long)]
    pub enrich: bool,

    /// Logo URL template containing {domain}
    #[arg(long)]
    pub logo_endpoint: Option<String>,

    #[arg(long)]
    pub concurrency: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads the TOML file when given, then applies explicit flags on top.
    pub fn resolve(&self) -> Result<FinderConfig> {
        let base = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                FinderConfig::from_file(path)?
            }
            None => FinderConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    pub fn apply_overrides(&self, mut config: FinderConfig) -> FinderConfig {
        if let Some(data) = &self.data {
            config.data.path = data.clone();
        }
        if let Some(value) = self.initial_buffer {
            config.engine.initial_buffer = value;
        }
        if let Some(value) = self.widen_step {
            config.engine.widen_step = value;
        }
        if let Some(value) = self.min_candidates {
            config.engine.min_candidates = value;
        }
        if let Some(value) = self.max_results {
            config.engine.max_results = value;
        }
        if let Some(value) = self.min_score {
            config.target.min_score = value;
        }
        if let Some(value) = self.max_score {
            config.target.max_score = value;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if self.enrich {
            config.enrichment.enabled = true;
        }
        if let Some(endpoint) = &self.logo_endpoint {
            config.enrichment.logo_endpoint = endpoint.clone();
        }
        if let Some(value) = self.concurrency {
            config.enrichment.concurrency = value;
        }
        config
    }
}
