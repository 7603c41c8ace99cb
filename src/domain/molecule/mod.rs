//! Molecule module - user-supplied descriptors of a drug candidate.

mod input;
mod structure;

pub use input::{MoleculeInput, MoleculeInputDraft, REQUIRED_FIELDS};
pub use structure::StructureClass;

#[cfg(test)]
pub(crate) use input::fixtures;
