use crate::core::enrichment::EnrichmentUpdate;
use crate::domain::model::{CollegeRecord, Enrichment, Recommendation};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCollege {
    pub rank: usize,
    #[serde(flatten)]
    pub college: CollegeRecord,
    pub score_distance: u64,
    #[serde(flatten)]
    pub enrichment: Enrichment,
}

impl RankedCollege {
    /// The numbered line the finder has always printed: `rank. name, score, rate`.
    pub fn text_line(&self) -> String {
        let mut line = format!(
            "{}. {}, {}, {}",
            self.rank, self.college.name, self.college.average_score, self.college.acceptance_rate
        );
        if let Some(logo) = &self.enrichment.logo_url {
            line.push_str(&format!(" [logo: {}]", logo));
        }
        line
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub skipped_rows: usize,
    pub target_score: i64,
    pub final_buffer: u64,
    pub widenings: u64,
    pub candidate_count: usize,
    pub exhausted: bool,
    pub colleges: Vec<RankedCollege>,
}

impl RecommendationReport {
    pub fn new(source: &str, skipped_rows: usize, recommendation: &Recommendation) -> Self {
        let target = recommendation.target_score;
        let colleges = recommendation
            .colleges
            .iter()
            .enumerate()
            .map(|(index, college)| RankedCollege {
                rank: index + 1,
                college: college.clone(),
                score_distance: college.score_distance(target),
                enrichment: Enrichment::default(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            source: source.to_string(),
            skipped_rows,
            target_score: target,
            final_buffer: recommendation.final_buffer,
            widenings: recommendation.widenings,
            candidate_count: recommendation.candidate_count,
            exhausted: recommendation.exhausted,
            colleges,
        }
    }

    /// Attaches a successful enrichment to the row it was keyed to.
    /// Returns the updated row, or `None` for failures and stale keys.
    pub fn apply_update(&mut self, update: &EnrichmentUpdate) -> Option<&RankedCollege> {
        let enrichment = update.outcome.as_ref().ok()?;
        let row = self
            .colleges
            .iter_mut()
            .find(|row| row.rank == update.key.rank && row.college.name == update.key.name)?;
        row.enrichment = enrichment.clone();
        Some(row)
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => self.render_json(),
            ReportFormat::Csv => self.render_csv(),
        }
    }

    pub fn render_text(&self) -> String {
        self.colleges
            .iter()
            .map(|row| format!("{}\n", row.text_line()))
            .collect()
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "rank",
            "name",
            "average_score",
            "acceptance_rate",
            "score_distance",
            "domain",
            "logo_url",
        ])?;

        for row in &self.colleges {
            writer.write_record([
                row.rank.to_string(),
                row.college.name.clone(),
                row.college.average_score.to_string(),
                row.college.acceptance_rate.to_string(),
                row.score_distance.to_string(),
                row.college.domain.clone(),
                row.enrichment.logo_url.clone().unwrap_or_default(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
