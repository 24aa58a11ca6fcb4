use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollegeRecord {
    pub name: String,
    pub acceptance_rate: i64,
    pub average_score: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain: String,
}

impl CollegeRecord {
    pub fn new(name: impl Into<String>, acceptance_rate: i64, average_score: i64) -> Self {
        Self {
            name: name.into(),
            acceptance_rate,
            average_score,
            domain: String::new(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn has_domain(&self) -> bool {
        !self.domain.is_empty()
    }

    /// Distance between this college's average and a target score.
    pub fn score_distance(&self, target_score: i64) -> u64 {
        self.average_score.abs_diff(target_score)
    }
}

/// Loaded colleges, ordered by ascending average score and then by
/// descending acceptance rate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<CollegeRecord>,
}

impl RecordSet {
    /// Builds a set from records in any order.
    pub fn from_records(mut records: Vec<CollegeRecord>) -> Self {
        records.sort_by(|a, b| {
            a.average_score
                .cmp(&b.average_score)
                .then_with(|| b.acceptance_rate.cmp(&a.acceptance_rate))
        });
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollegeRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[CollegeRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a CollegeRecord;
    type IntoIter = std::slice::Iter<'a, CollegeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub records: RecordSet,
    pub skipped: Vec<SkippedRow>,
}

/// Identity of a ranked college for enrichment updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RecordKey {
    pub rank: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub target_score: i64,
    pub final_buffer: u64,
    pub widenings: u64,
    pub candidate_count: usize,
    pub exhausted: bool,
    pub colleges: Vec<CollegeRecord>,
}

impl Recommendation {
    pub fn keys(&self) -> Vec<RecordKey> {
        self.colleges
            .iter()
            .enumerate()
            .map(|(index, college)| RecordKey {
                rank: index + 1,
                name: college.name.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_set_orders_by_score_then_rate_desc() {
        let set = RecordSet::from_records(vec![
            CollegeRecord::new("High", 40, 1400),
            CollegeRecord::new("LowSelective", 10, 1100),
            CollegeRecord::new("LowOpen", 80, 1100),
            CollegeRecord::new("Mid", 50, 1250),
        ]);

        let names: Vec<&str> = set.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["LowOpen", "LowSelective", "Mid", "High"]);
    }

    #[test]
    fn test_score_distance_handles_extremes() {
        let college = CollegeRecord::new("Edge", 50, i64::MIN);
        assert_eq!(college.score_distance(i64::MAX), u64::MAX);
        assert_eq!(CollegeRecord::new("X", 1, 1200).score_distance(1150), 50);
    }

    #[test]
    fn test_recommendation_keys_are_one_based() {
        let recommendation = Recommendation {
            target_score: 1200,
            final_buffer: 100,
            widenings: 0,
            candidate_count: 2,
            exhausted: true,
            colleges: vec![CollegeRecord::new("A", 10, 1200), CollegeRecord::new("B", 20, 1210)],
        };
        let keys = recommendation.keys();
        assert_eq!(keys[0], RecordKey { rank: 1, name: "A".to_string() });
        assert_eq!(keys[1].rank, 2);
    }
}
