use super::bond::BondOrder;
use super::ids::{AtomId, BondId};
use super::molecule::Molecule;
use nalgebra::Point2;

/// A perceived cycle of the molecular graph.
///
/// Rings hold only their member atom keys; bonds, centroid, and the dedup
/// identifier are derived against the owning molecule on demand. Rings are
/// rebuilt wholesale by ring perception whenever membership of the molecule
/// changes, so nothing here is kept incrementally consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    atoms: Vec<AtomId>,
}

impl Ring {
    pub fn new(atoms: Vec<AtomId>) -> Self {
        Self { atoms }
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atoms.contains(&atom_id)
    }

    /// Ranking used to restrict double-bond placement to recognized small
    /// rings: 6 > 5 > 7 > 4 > 3 (lower value = higher preference). Zero
    /// means unranked and excluded from placement.
    pub fn priority(&self) -> u8 {
        match self.atoms.len() {
            6 => 1,
            5 => 2,
            7 => 3,
            4 => 4,
            3 => 5,
            _ => 0,
        }
    }

    /// Bonds of the molecule whose endpoints both belong to this ring.
    /// For the simple cycles ring perception emits, this is exactly the
    /// ring's edge set.
    pub fn bonds(&self, molecule: &Molecule) -> Vec<BondId> {
        molecule
            .bonds_iter()
            .filter(|(_, b)| self.contains(b.start_atom) && self.contains(b.end_atom))
            .map(|(id, _)| id)
            .collect()
    }

    /// Arithmetic mean of the member atoms' positions.
    pub fn centroid(&self, molecule: &Molecule) -> Point2<f64> {
        let mut sum = nalgebra::Vector2::zeros();
        let mut count = 0usize;
        for &atom_id in &self.atoms {
            if let Some(atom) = molecule.atom(atom_id) {
                sum += atom.position.coords;
                count += 1;
            }
        }
        if count == 0 {
            Point2::origin()
        } else {
            Point2::from(sum / count as f64)
        }
    }

    /// Count of existing double bonds within the ring, one input to the
    /// double-bond placement sort.
    pub fn double_bond_count(&self, molecule: &Molecule) -> usize {
        self.bonds(molecule)
            .iter()
            .filter_map(|&id| molecule.bond(id))
            .filter(|b| b.order == BondOrder::Double)
            .count()
    }

    /// Canonical identifier built from the sorted member atom labels,
    /// used to deduplicate rings found from different seeds.
    pub fn unique_id(&self, molecule: &Molecule) -> String {
        let mut labels: Vec<&str> = self
            .atoms
            .iter()
            .filter_map(|&id| molecule.atom(id))
            .map(|a| a.id.as_str())
            .collect();
        labels.sort_unstable();
        labels.join("-")
    }
}
