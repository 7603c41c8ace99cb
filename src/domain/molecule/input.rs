//! Molecule inputs: the form draft and its validated form.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ValidationError, NOT_SPECIFIED};

use super::StructureClass;

/// Required fields in validation order, by wire name.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "geneSymbol",
    "uniprotId",
    "structureType",
    "mechanism",
    "route",
    "indication",
    "phase",
    "type",
];

/// Form state for a molecule: everything optional until submission.
///
/// Partial updates from the dashboard are merged with [`merge`](Self::merge);
/// [`validate`](Self::validate) turns a complete draft into a [`MoleculeInput`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoleculeInputDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene_symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uniprot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub drug_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecular_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solubility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_receptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_life: Option<String>,
}

impl MoleculeInputDraft {
    /// Overlays every field that `patch` sets. Last writer wins per field.
    pub fn merge(&mut self, patch: MoleculeInputDraft) {
        fn overlay(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }

        overlay(&mut self.gene_symbol, patch.gene_symbol);
        overlay(&mut self.uniprot_id, patch.uniprot_id);
        overlay(&mut self.structure_type, patch.structure_type);
        overlay(&mut self.mechanism, patch.mechanism);
        overlay(&mut self.route, patch.route);
        overlay(&mut self.indication, patch.indication);
        overlay(&mut self.phase, patch.phase);
        overlay(&mut self.drug_type, patch.drug_type);
        overlay(&mut self.molecular_weight, patch.molecular_weight);
        overlay(&mut self.solubility, patch.solubility);
        overlay(&mut self.target_receptor, patch.target_receptor);
        overlay(&mut self.half_life, patch.half_life);
    }

    /// Checks the required fields in [`REQUIRED_FIELDS`] order and reports
    /// the first one that is absent or blank.
    pub fn validate(&self) -> Result<MoleculeInput, ValidationError> {
        let required = [
            &self.gene_symbol,
            &self.uniprot_id,
            &self.structure_type,
            &self.mechanism,
            &self.route,
            &self.indication,
            &self.phase,
            &self.drug_type,
        ];

        let mut values = Vec::with_capacity(REQUIRED_FIELDS.len());
        for (name, value) in REQUIRED_FIELDS.iter().zip(required) {
            match non_blank(value) {
                Some(v) => values.push(v),
                None => return Err(ValidationError::missing_required(*name)),
            }
        }

        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or_default();

        Ok(MoleculeInput {
            gene_symbol: next(),
            uniprot_id: next(),
            structure_type: next(),
            mechanism: next(),
            route: next(),
            indication: next(),
            phase: next(),
            drug_type: next(),
            molecular_weight: non_blank(&self.molecular_weight),
            solubility: non_blank(&self.solubility),
            target_receptor: non_blank(&self.target_receptor),
            half_life: non_blank(&self.half_life),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A validated description of a drug candidate.
///
/// Every required field is non-empty; construct through
/// [`MoleculeInputDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoleculeInput {
    pub gene_symbol: String,
    pub uniprot_id: String,
    pub structure_type: String,
    pub mechanism: String,
    pub route: String,
    pub indication: String,
    pub phase: String,
    #[serde(rename = "type")]
    pub drug_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecular_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solubility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_receptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_life: Option<String>,
}

impl MoleculeInput {
    /// Coarse structure classification used to branch mock content.
    pub fn structure_class(&self) -> StructureClass {
        StructureClass::classify(&self.structure_type)
    }

    /// The required fields paired with their wire names.
    pub fn required_values(&self) -> [(&'static str, &str); 8] {
        [
            ("geneSymbol", &self.gene_symbol),
            ("uniprotId", &self.uniprot_id),
            ("structureType", &self.structure_type),
            ("mechanism", &self.mechanism),
            ("route", &self.route),
            ("indication", &self.indication),
            ("phase", &self.phase),
            ("type", &self.drug_type),
        ]
    }

    pub fn molecular_weight_or_default(&self) -> &str {
        self.molecular_weight.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn solubility_or_default(&self) -> &str {
        self.solubility.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn target_receptor_or_default(&self) -> &str {
        self.target_receptor.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn half_life_or_default(&self) -> &str {
        self.half_life.as_deref().unwrap_or(NOT_SPECIFIED)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// The PDE3A inhaled small molecule used throughout the dashboard demos.
    pub fn pde3a_draft() -> MoleculeInputDraft {
        MoleculeInputDraft {
            gene_symbol: Some("PDE3A".to_string()),
            uniprot_id: Some("P27815".to_string()),
            structure_type: Some("Small molecule".to_string()),
            mechanism: Some("PDE3/4 inhibitor".to_string()),
            route: Some("Inhalation".to_string()),
            indication: Some("COPD".to_string()),
            phase: Some("Phase III".to_string()),
            drug_type: Some("Inhaled Small Molecule".to_string()),
            ..Default::default()
        }
    }

    pub fn pde3a() -> MoleculeInput {
        pde3a_draft().validate().unwrap()
    }

    pub fn with_structure(structure_type: &str) -> MoleculeInput {
        let mut input = pde3a();
        input.structure_type = structure_type.to_string();
        input
    }
}
