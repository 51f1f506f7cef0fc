//! Reversible edit operations.
//!
//! Every mutation the editor can journal is a value of [`EditOp`]. Ops
//! address entities by their string labels rather than arena keys: keys
//! change when an undo re-inserts an atom, labels do not. Each op carries
//! enough state to construct its own inverse with [`EditOp::inverted`].

use super::error::EditError;
use crate::core::models::atom::Atom;
use crate::core::models::bond::{Bond, BondOrder, BondPlacement, BondStereo};
use crate::core::models::element::Element;
use crate::core::models::ids::{AtomId, BondId};
use crate::core::models::model::Model;
use crate::core::models::molecule::Molecule;
use nalgebra::Point2;
use tracing::trace;

/// Everything needed to recreate an atom from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSpec {
    pub label: String,
    pub element: Option<&'static Element>,
    pub position: Point2<f64>,
    pub formal_charge: Option<i32>,
    pub isotope_number: Option<u32>,
}

impl AtomSpec {
    pub fn capture(atom: &Atom) -> Self {
        Self {
            label: atom.id.clone(),
            element: atom.element,
            position: atom.position,
            formal_charge: atom.formal_charge,
            isotope_number: atom.isotope_number,
        }
    }

    fn build(&self) -> Atom {
        let mut atom = Atom::new(self.element, self.position);
        atom.id = self.label.clone();
        atom.formal_charge = self.formal_charge;
        atom.isotope_number = self.isotope_number;
        atom
    }
}

/// Everything needed to recreate a bond, with endpoints as atom labels.
#[derive(Debug, Clone, PartialEq)]
pub struct BondSpec {
    pub label: String,
    pub start_atom: String,
    pub end_atom: String,
    pub order: BondOrder,
    pub stereo: BondStereo,
    pub placement: Option<BondPlacement>,
}

impl BondSpec {
    /// Snapshots a live bond. `None` when an endpoint atom is gone, which
    /// cannot happen for bonds captured before a removal.
    pub fn capture(bond: &Bond, molecule: &Molecule) -> Option<Self> {
        let start = molecule.atom(bond.start_atom)?;
        let end = molecule.atom(bond.end_atom)?;
        Some(Self {
            label: bond.id.clone(),
            start_atom: start.id.clone(),
            end_atom: end.id.clone(),
            order: bond.order,
            stereo: bond.stereo,
            placement: bond.placement,
        })
    }

    fn build(&self, start: AtomId, end: AtomId) -> Bond {
        let mut bond = Bond::new(start, end, self.order);
        bond.id = self.label.clone();
        bond.stereo = self.stereo;
        bond.placement = self.placement;
        bond
    }
}

/// One reversible edit against the model.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    AddAtom {
        molecule: String,
        atom: AtomSpec,
    },
    /// Removes an atom and, implicitly, every incident bond. The severed
    /// bonds are part of the op so the inverse can restore them.
    RemoveAtom {
        molecule: String,
        atom: AtomSpec,
        severed_bonds: Vec<BondSpec>,
    },
    /// Inverse of [`EditOp::RemoveAtom`]: re-adds the atom and its bonds.
    RestoreAtom {
        molecule: String,
        atom: AtomSpec,
        severed_bonds: Vec<BondSpec>,
    },
    AddBond {
        molecule: String,
        bond: BondSpec,
    },
    RemoveBond {
        molecule: String,
        bond: BondSpec,
    },
    MoveAtom {
        molecule: String,
        atom: String,
        from: Point2<f64>,
        to: Point2<f64>,
    },
    SetBondOrder {
        molecule: String,
        bond: String,
        from: BondOrder,
        to: BondOrder,
    },
    SetBondStereo {
        molecule: String,
        bond: String,
        from: BondStereo,
        to: BondStereo,
    },
    SetFormalCharge {
        molecule: String,
        atom: String,
        from: Option<i32>,
        to: Option<i32>,
    },
    SetIsotope {
        molecule: String,
        atom: String,
        from: Option<u32>,
        to: Option<u32>,
    },
}

impl EditOp {
    /// Builds a removal op for a live atom, snapshotting it together with
    /// the bonds the removal will sever.
    pub fn remove_atom(molecule: &Molecule, atom_id: AtomId) -> Option<EditOp> {
        let atom = molecule.atom(atom_id)?;
        let severed_bonds = molecule
            .neighbors(atom_id)
            .iter()
            .filter_map(|&(bond_id, _)| molecule.bond(bond_id))
            .filter_map(|bond| BondSpec::capture(bond, molecule))
            .collect();
        Some(EditOp::RemoveAtom {
            molecule: molecule.id.clone(),
            atom: AtomSpec::capture(atom),
            severed_bonds,
        })
    }

    /// Builds a removal op for a live bond.
    pub fn remove_bond(molecule: &Molecule, bond_id: BondId) -> Option<EditOp> {
        let bond = molecule.bond(bond_id)?;
        Some(EditOp::RemoveBond {
            molecule: molecule.id.clone(),
            bond: BondSpec::capture(bond, molecule)?,
        })
    }

    /// Builds a move op for a live atom.
    pub fn move_atom(molecule: &Molecule, atom_id: AtomId, to: Point2<f64>) -> Option<EditOp> {
        let atom = molecule.atom(atom_id)?;
        Some(EditOp::MoveAtom {
            molecule: molecule.id.clone(),
            atom: atom.id.clone(),
            from: atom.position,
            to,
        })
    }

    /// Applies the edit to the model. Structural edits re-perceive the
    /// affected molecule's rings before returning.
    pub fn apply(&self, model: &mut Model) -> Result<(), EditError> {
        trace!(op = ?self, "applying edit");
        match self {
            EditOp::AddAtom { molecule, atom } => {
                let molecule = molecule_mut(model, molecule)?;
                if molecule.atom_by_label(&atom.label).is_some() {
                    return Err(EditError::DuplicateAtom(atom.label.clone()));
                }
                molecule.add_atom(atom.build());
                molecule.rebuild_rings();
                Ok(())
            }
            EditOp::RemoveAtom { molecule, atom, .. } => {
                let molecule = molecule_mut(model, molecule)?;
                let atom_id = resolve_atom(molecule, &atom.label)?;
                let _ = molecule.remove_atom(atom_id);
                molecule.rebuild_rings();
                Ok(())
            }
            EditOp::RestoreAtom {
                molecule,
                atom,
                severed_bonds,
            } => {
                let molecule = molecule_mut(model, molecule)?;
                if molecule.atom_by_label(&atom.label).is_some() {
                    return Err(EditError::DuplicateAtom(atom.label.clone()));
                }
                molecule.add_atom(atom.build());
                for spec in severed_bonds {
                    add_bond_from_spec(molecule, spec)?;
                }
                molecule.rebuild_rings();
                Ok(())
            }
            EditOp::AddBond { molecule, bond } => {
                let molecule = molecule_mut(model, molecule)?;
                add_bond_from_spec(molecule, bond)?;
                molecule.rebuild_rings();
                Ok(())
            }
            EditOp::RemoveBond { molecule, bond } => {
                let molecule = molecule_mut(model, molecule)?;
                let bond_id = resolve_bond(molecule, &bond.label)?;
                let _ = molecule.remove_bond(bond_id);
                molecule.rebuild_rings();
                Ok(())
            }
            EditOp::MoveAtom {
                molecule, atom, to, ..
            } => {
                let molecule = molecule_mut(model, molecule)?;
                let atom_id = resolve_atom(molecule, atom)?;
                let _ = molecule.set_atom_position(atom_id, *to);
                Ok(())
            }
            EditOp::SetBondOrder {
                molecule, bond, to, ..
            } => {
                let molecule = molecule_mut(model, molecule)?;
                let bond_id = resolve_bond(molecule, bond)?;
                if let Some(bond) = molecule.bond_mut(bond_id) {
                    bond.order = *to;
                }
                Ok(())
            }
            EditOp::SetBondStereo {
                molecule, bond, to, ..
            } => {
                let molecule = molecule_mut(model, molecule)?;
                let bond_id = resolve_bond(molecule, bond)?;
                if let Some(bond) = molecule.bond_mut(bond_id) {
                    bond.stereo = *to;
                }
                Ok(())
            }
            EditOp::SetFormalCharge {
                molecule, atom, to, ..
            } => {
                let molecule = molecule_mut(model, molecule)?;
                let atom_id = resolve_atom(molecule, atom)?;
                if let Some(atom) = molecule.atom_mut(atom_id) {
                    atom.formal_charge = *to;
                }
                Ok(())
            }
            EditOp::SetIsotope {
                molecule, atom, to, ..
            } => {
                let molecule = molecule_mut(model, molecule)?;
                let atom_id = resolve_atom(molecule, atom)?;
                if let Some(atom) = molecule.atom_mut(atom_id) {
                    atom.isotope_number = *to;
                }
                Ok(())
            }
        }
    }

    /// The op that exactly undoes this one.
    pub fn inverted(&self) -> EditOp {
        match self.clone() {
            EditOp::AddAtom { molecule, atom } => EditOp::RemoveAtom {
                molecule,
                atom,
                severed_bonds: Vec::new(),
            },
            EditOp::RemoveAtom {
                molecule,
                atom,
                severed_bonds,
            } => EditOp::RestoreAtom {
                molecule,
                atom,
                severed_bonds,
            },
            EditOp::RestoreAtom {
                molecule,
                atom,
                severed_bonds,
            } => EditOp::RemoveAtom {
                molecule,
                atom,
                severed_bonds,
            },
            EditOp::AddBond { molecule, bond } => EditOp::RemoveBond { molecule, bond },
            EditOp::RemoveBond { molecule, bond } => EditOp::AddBond { molecule, bond },
            EditOp::MoveAtom {
                molecule,
                atom,
                from,
                to,
            } => EditOp::MoveAtom {
                molecule,
                atom,
                from: to,
                to: from,
            },
            EditOp::SetBondOrder {
                molecule,
                bond,
                from,
                to,
            } => EditOp::SetBondOrder {
                molecule,
                bond,
                from: to,
                to: from,
            },
            EditOp::SetBondStereo {
                molecule,
                bond,
                from,
                to,
            } => EditOp::SetBondStereo {
                molecule,
                bond,
                from: to,
                to: from,
            },
            EditOp::SetFormalCharge {
                molecule,
                atom,
                from,
                to,
            } => EditOp::SetFormalCharge {
                molecule,
                atom,
                from: to,
                to: from,
            },
            EditOp::SetIsotope {
                molecule,
                atom,
                from,
                to,
            } => EditOp::SetIsotope {
                molecule,
                atom,
                from: to,
                to: from,
            },
        }
    }
}

fn molecule_mut<'a>(model: &'a mut Model, label: &str) -> Result<&'a mut Molecule, EditError> {
    model
        .molecule_by_id_mut(label)
        .ok_or_else(|| EditError::MoleculeNotFound(label.to_string()))
}

fn resolve_atom(molecule: &Molecule, label: &str) -> Result<AtomId, EditError> {
    molecule
        .atom_by_label(label)
        .ok_or_else(|| EditError::AtomNotFound(label.to_string()))
}

fn resolve_bond(molecule: &Molecule, label: &str) -> Result<BondId, EditError> {
    molecule
        .bond_by_label(label)
        .ok_or_else(|| EditError::BondNotFound(label.to_string()))
}

fn add_bond_from_spec(molecule: &mut Molecule, spec: &BondSpec) -> Result<BondId, EditError> {
    if molecule.bond_by_label(&spec.label).is_some() {
        return Err(EditError::DuplicateBond(spec.label.clone()));
    }
    let start = resolve_atom(molecule, &spec.start_atom)?;
    let end = resolve_atom(molecule, &spec.end_atom)?;
    molecule
        .add_bond(spec.build(start, end))
        .ok_or_else(|| EditError::DuplicateBond(spec.label.clone()))
}
