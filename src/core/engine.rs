use crate::domain::model::{CollegeRecord, Recommendation, RecordSet};
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

pub const DEFAULT_INITIAL_BUFFER: u64 = 100;
pub const DEFAULT_WIDEN_STEP: u64 = 100;
pub const DEFAULT_MIN_CANDIDATES: usize = 10;
pub const DEFAULT_MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Half-width of the first score band.
    pub initial_buffer: u64,
    /// Amount added to each side of the band per widening.
    pub widen_step: u64,
    pub min_candidates: usize,
    pub max_results: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_buffer: DEFAULT_INITIAL_BUFFER,
            widen_step: DEFAULT_WIDEN_STEP,
            min_candidates: DEFAULT_MIN_CANDIDATES,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("engine.widen_step", self.widen_step as usize, 1)?;
        validate_positive_number("engine.min_candidates", self.min_candidates, 1)?;
        validate_positive_number("engine.max_results", self.max_results, 1)?;
        Ok(())
    }
}

/// Outcome of the adaptive band filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandSelection {
    pub buffer: u64,
    pub widenings: u64,
    pub exhausted: bool,
    pub candidates: Vec<CollegeRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ranked shortlist for `target_score`, at most `max_results` long.
    pub fn recommend(&self, records: &RecordSet, target_score: i64) -> Vec<CollegeRecord> {
        self.recommend_detailed(records, target_score).colleges
    }

    pub fn recommend_detailed(&self, records: &RecordSet, target_score: i64) -> Recommendation {
        let selection = self.select_band(records, target_score);
        let candidate_count = selection.candidates.len();

        let mut colleges = rank(selection.candidates, target_score);
        colleges.truncate(self.config.max_results);

        tracing::debug!(
            "Ranked {} candidates for {}, returning {}",
            candidate_count,
            target_score,
            colleges.len()
        );

        Recommendation {
            target_score,
            final_buffer: selection.buffer,
            widenings: selection.widenings,
            candidate_count,
            exhausted: selection.exhausted,
            colleges,
        }
    }

    /// Filters `records` to `[target - buffer, target + buffer]`, widening the
    /// band by `widen_step` until `min_candidates` are inside or every record is.
    ///
    /// Each widening re-filters the full set, so the final buffer is the
    /// smallest `initial_buffer + k * widen_step` covering the
    /// `min_candidates`-th closest record. That buffer is computed from the
    /// sorted distances instead of looping, which gives the same band for any
    /// score spread.
    pub fn select_band(&self, records: &RecordSet, target_score: i64) -> BandSelection {
        let initial = self.config.initial_buffer;
        let step = self.config.widen_step.max(1);

        let mut distances: Vec<u64> = records
            .iter()
            .map(|college| college.score_distance(target_score))
            .collect();
        distances.sort_unstable();

        // 需要被涵蓋的距離：第 min_candidates 近的紀錄，資料不足時為最遠的紀錄
        let required = match distances.len() {
            0 => 0,
            len => distances[self.config.min_candidates.clamp(1, len) - 1],
        };

        let widenings = if required <= initial {
            0
        } else {
            (required - initial).div_ceil(step)
        };
        let buffer = initial.saturating_add(widenings.saturating_mul(step));

        if widenings > 0 {
            tracing::debug!(
                "Fewer than {} colleges within {} points of {}, widening",
                self.config.min_candidates,
                initial,
                target_score
            );
            tracing::info!(
                "🔍 Widened score band {} time(s): ±{} around {}",
                widenings,
                buffer,
                target_score
            );
        }

        let candidates: Vec<CollegeRecord> = records
            .iter()
            .filter(|college| college.score_distance(target_score) <= buffer)
            .cloned()
            .collect();
        let exhausted = candidates.len() < self.config.min_candidates;

        BandSelection {
            buffer,
            widenings,
            exhausted,
            candidates,
        }
    }
}

/// Stable sort by distance to `target_score`, then by acceptance rate descending.
pub fn rank(mut candidates: Vec<CollegeRecord>, target_score: i64) -> Vec<CollegeRecord> {
    candidates.sort_by_key(|college| {
        (
            college.score_distance(target_score),
            Reverse(college.acceptance_rate),
        )
    });
    candidates
}
