use thiserror::Error;

/// Errors raised while applying an edit operation to a model.
///
/// Every entity reference in an operation resolves through string labels,
/// so each failure names the label that did not resolve (or collided).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Molecule '{0}' not found in the model")]
    MoleculeNotFound(String),

    #[error("Atom '{0}' not found in the molecule")]
    AtomNotFound(String),

    #[error("Bond '{0}' not found in the molecule")]
    BondNotFound(String),

    #[error("An atom labelled '{0}' already exists in the molecule")]
    DuplicateAtom(String),

    #[error("Bond '{0}' was rejected; the atoms may already be bonded")]
    DuplicateBond(String),
}
