//! Request bodies for dashboard endpoints.

use serde::Deserialize;

use crate::domain::foundation::ValidationError;

/// Body of `POST /api/dashboard/quick-analysis`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickAnalysisRequest {
    pub drug_name: String,
}

impl QuickAnalysisRequest {
    /// The trimmed drug name, or an error when blank.
    pub fn drug_name(&self) -> Result<&str, ValidationError> {
        let name = self.drug_name.trim();
        if name.is_empty() {
            return Err(ValidationError::missing_required("drugName"));
        }
        Ok(name)
    }
}
