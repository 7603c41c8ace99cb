//! Recent analysis history.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::foundation::{Score, Timestamp};
use crate::domain::report::DrugAnalysisReport;

pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Mock,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: Timestamp,
    pub drug_name: String,
    pub risk_score: Score,
    pub processing_time: String,
    pub model_used: String,
    pub status: AnalysisStatus,
}

impl HistoryEntry {
    pub fn from_report(report: &DrugAnalysisReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Timestamp::now(),
            drug_name: report.drug_name.clone(),
            risk_score: report.risk_assessment.overall_score,
            processing_time: report.processing_time.clone(),
            model_used: report.model_used.clone(),
            status: if report.is_mock_response {
                AnalysisStatus::Mock
            } else {
                AnalysisStatus::Success
            },
        }
    }

    pub fn failed(drug_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Timestamp::now(),
            drug_name: drug_name.into(),
            risk_score: Score::default(),
            processing_time: String::new(),
            model_used: String::new(),
            status: AnalysisStatus::Error,
        }
    }
}

/// Newest-first list bounded by [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnalysisHistory(Vec<HistoryEntry>);

impl AnalysisHistory {
    pub fn record(&mut self, entry: HistoryEntry) {
        self.0.insert(0, entry);
        self.0.truncate(HISTORY_CAPACITY);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
