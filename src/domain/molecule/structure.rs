//! Coarse structure-type classification.

use serde::Serialize;
use std::fmt;

/// Structure family of a molecule, derived from its free-text structure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureClass {
    Radioligand,
    Biologic,
    SmallMolecule,
    /// Anything else; content falls back to the small-molecule variant.
    Unspecified,
}

impl StructureClass {
    /// Case-insensitive substring match, radioligand taking precedence.
    pub fn classify(structure_type: &str) -> Self {
        let lowered = structure_type.to_lowercase();
        if lowered.contains("radioligand") {
            StructureClass::Radioligand
        } else if lowered.contains("biologic") {
            StructureClass::Biologic
        } else if lowered.contains("small molecule") {
            StructureClass::SmallMolecule
        } else {
            StructureClass::Unspecified
        }
    }

    pub fn is_radioligand(&self) -> bool {
        matches!(self, StructureClass::Radioligand)
    }

    pub fn is_biologic(&self) -> bool {
        matches!(self, StructureClass::Biologic)
    }

    /// Picks the radioligand, biologic or (default) small-molecule variant.
    pub fn pick<T>(&self, radioligand: T, biologic: T, small_molecule: T) -> T {
        match self {
            StructureClass::Radioligand => radioligand,
            StructureClass::Biologic => biologic,
            StructureClass::SmallMolecule | StructureClass::Unspecified => small_molecule,
        }
    }
}

impl fmt::Display for StructureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StructureClass::Radioligand => "radioligand",
            StructureClass::Biologic => "biologic",
            StructureClass::SmallMolecule => "small_molecule",
            StructureClass::Unspecified => "unspecified",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_substring() {
        assert_eq!(
            StructureClass::classify("Lu-177 Radioligand"),
            StructureClass::Radioligand
        );
        assert_eq!(
            StructureClass::classify("Biologic (mAb)"),
            StructureClass::Biologic
        );
        assert_eq!(
            StructureClass::classify("Small Molecule"),
            StructureClass::SmallMolecule
        );
        assert_eq!(StructureClass::classify("Peptide"), StructureClass::Unspecified);
    }

    #[test]
    fn radioligand_takes_precedence() {
        assert_eq!(
            StructureClass::classify("biologic radioligand conjugate"),
            StructureClass::Radioligand
        );
    }

    #[test]
    fn unspecified_picks_small_molecule_variant() {
        assert_eq!(StructureClass::Unspecified.pick(1, 2, 3), 3);
        assert_eq!(StructureClass::Biologic.pick(1, 2, 3), 2);
        assert_eq!(StructureClass::Radioligand.pick(1, 2, 3), 1);
    }
}
