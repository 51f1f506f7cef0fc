use super::ids::{AtomId, BondId};
use super::molecule::Molecule;
use crate::core::config::DrawingConfig;
use crate::core::geometry::Rect;
use tracing::debug;

/// The whole sketch: a forest of molecules plus the drawing settings.
///
/// The model is the unit the undo journal operates on. Entities are
/// addressed across undo round trips by their string labels, which
/// [`Model::relabel`] keeps globally unique.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub molecules: Vec<Molecule>,
    pub settings: DrawingConfig,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a molecule anywhere in the forest by its label.
    pub fn molecule_by_id(&self, id: &str) -> Option<&Molecule> {
        fn find<'a>(list: &'a [Molecule], id: &str) -> Option<&'a Molecule> {
            for molecule in list {
                if molecule.id == id {
                    return Some(molecule);
                }
                if let Some(found) = find(&molecule.children, id) {
                    return Some(found);
                }
            }
            None
        }
        find(&self.molecules, id)
    }

    pub fn molecule_by_id_mut(&mut self, id: &str) -> Option<&mut Molecule> {
        fn find<'a>(list: &'a mut [Molecule], id: &str) -> Option<&'a mut Molecule> {
            for molecule in list {
                if molecule.id == id {
                    return Some(molecule);
                }
                if let Some(found) = find(&mut molecule.children, id) {
                    return Some(found);
                }
            }
            None
        }
        find(&mut self.molecules, id)
    }

    pub fn total_atoms_count(&self) -> usize {
        fn count(molecule: &Molecule) -> usize {
            molecule.atom_count() + molecule.children.iter().map(count).sum::<usize>()
        }
        self.molecules.iter().map(count).sum()
    }

    pub fn total_bonds_count(&self) -> usize {
        fn count(molecule: &Molecule) -> usize {
            molecule.bond_count() + molecule.children.iter().map(count).sum::<usize>()
        }
        self.molecules.iter().map(count).sum()
    }

    /// Mean bond length over the whole sketch. A sketch with no bonds
    /// reports the configured standard bond length, so layout code always
    /// has a usable scale.
    pub fn mean_bond_length(&self) -> f64 {
        let mut total = 0.0;
        let mut count = 0usize;
        for molecule in &self.molecules {
            molecule.accumulate_bond_lengths(&mut total, &mut count);
        }
        if count == 0 {
            self.settings.standard_bond_length
        } else {
            total / count as f64
        }
    }

    /// Bounding box over every molecule, or `None` for an empty sketch.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.molecules
            .iter()
            .filter_map(|molecule| molecule.bounding_box())
            .reduce(|a, b| a.union(&b))
    }

    /// Reassigns every label in the model: molecules get `m1, m2, ...`,
    /// atoms `a1, a2, ...` and bonds `b1, b2, ...`, each counter running
    /// globally across the whole forest so labels are unique model-wide.
    pub fn relabel(&mut self) {
        let mut molecule_counter = 0usize;
        let mut atom_counter = 0usize;
        let mut bond_counter = 0usize;
        for molecule in &mut self.molecules {
            Self::relabel_molecule(
                molecule,
                &mut molecule_counter,
                &mut atom_counter,
                &mut bond_counter,
            );
        }
        debug!(
            molecules = molecule_counter,
            atoms = atom_counter,
            bonds = bond_counter,
            "model relabelled"
        );
    }

    fn relabel_molecule(
        molecule: &mut Molecule,
        molecule_counter: &mut usize,
        atom_counter: &mut usize,
        bond_counter: &mut usize,
    ) {
        *molecule_counter += 1;
        molecule.id = format!("m{molecule_counter}");

        let atom_ids: Vec<AtomId> = molecule.atoms_iter().map(|(id, _)| id).collect();
        for atom_id in atom_ids {
            *atom_counter += 1;
            molecule.set_atom_label(atom_id, format!("a{atom_counter}"));
        }
        let bond_ids: Vec<BondId> = molecule.bonds_iter().map(|(id, _)| id).collect();
        for bond_id in bond_ids {
            *bond_counter += 1;
            molecule.set_bond_label(bond_id, format!("b{bond_counter}"));
        }
        for child in &mut molecule.children {
            Self::relabel_molecule(child, molecule_counter, atom_counter, bond_counter);
        }
    }

    /// Refreshes every molecule, adopting any components that split off
    /// and dropping molecules that ended up empty.
    pub fn refresh(&mut self) {
        let mut kept = Vec::new();
        for mut molecule in std::mem::take(&mut self.molecules) {
            if molecule.atom_count() == 0 && molecule.children.is_empty() {
                continue;
            }
            let spun_off = molecule.refresh();
            kept.push(molecule);
            kept.extend(spun_off);
        }
        self.molecules = kept;
    }

    /// Re-perceives rings throughout the forest.
    pub fn rebuild_rings(&mut self) {
        fn rebuild(molecule: &mut Molecule) {
            molecule.rebuild_rings();
            for child in &mut molecule.children {
                rebuild(child);
            }
        }
        for molecule in &mut self.molecules {
            rebuild(molecule);
        }
    }
}
