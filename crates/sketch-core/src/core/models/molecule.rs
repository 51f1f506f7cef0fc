use super::atom::Atom;
use super::bond::{Bond, BondOrder};
use super::ids::{AtomId, BondId};
use super::ring::Ring;
use crate::core::geometry::{self, Rect, hull};
use nalgebra::{Point2, Vector2};
use slotmap::{SecondaryMap, SlotMap};
use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use tracing::debug;

/// A connected(ish) molecular graph plus its perceived rings.
///
/// Atoms and bonds live in generational arenas; the adjacency cache, the
/// label indexes, and the derived-value caches are all maintained by the
/// mutation methods on this type; the arenas themselves stay private.
/// Connectivity is an invariant restored by [`Molecule::refresh`] rather
/// than enforced per mutation: callers batch edits and refresh once.
///
/// Everything here is single-threaded; derived values are cached in
/// `OnceCell`s behind `&self`, so the type is not `Sync`.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    /// Stable label unique within the model (e.g. `m1`), assigned by
    /// [`Model::relabel`](super::model::Model::relabel).
    pub id: String,
    atoms: SlotMap<AtomId, Atom>,
    bonds: SlotMap<BondId, Bond>,
    /// Per-atom incident edges, kept in sync by add/remove.
    adjacency: SecondaryMap<AtomId, Vec<(BondId, AtomId)>>,
    atom_labels: HashMap<String, AtomId>,
    bond_labels: HashMap<String, BondId>,
    rings: Vec<Ring>,
    rings_calculated: bool,
    /// Nested child molecules (brackets, mixtures).
    pub children: Vec<Molecule>,
    /// Non-fatal issues collected while importing, e.g. unknown element
    /// symbols.
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    formula_cache: OnceCell<String>,
    bbox_cache: OnceCell<Option<Rect>>,
    sorted_rings_cache: OnceCell<Vec<Ring>>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    // -- access ----------------------------------------------------------

    pub fn atom(&self, atom_id: AtomId) -> Option<&Atom> {
        self.atoms.get(atom_id)
    }

    pub fn bond(&self, bond_id: BondId) -> Option<&Bond> {
        self.bonds.get(bond_id)
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn bonds_iter(&self) -> impl Iterator<Item = (BondId, &Bond)> {
        self.bonds.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn atom_by_label(&self, label: &str) -> Option<AtomId> {
        self.atom_labels.get(label).copied()
    }

    pub fn bond_by_label(&self, label: &str) -> Option<BondId> {
        self.bond_labels.get(label).copied()
    }

    /// Incident edges of an atom as `(bond, other endpoint)` pairs. Empty
    /// for unknown atoms.
    pub fn neighbors(&self, atom_id: AtomId) -> &[(BondId, AtomId)] {
        self.adjacency.get(atom_id).map_or(&[], |list| list.as_slice())
    }

    pub fn degree(&self, atom_id: AtomId) -> usize {
        self.neighbors(atom_id).len()
    }

    /// The bond joining the two atoms, in either direction.
    pub fn bond_between(&self, a: AtomId, b: AtomId) -> Option<BondId> {
        self.neighbors(a)
            .iter()
            .find(|&&(_, other)| other == b)
            .map(|&(bond_id, _)| bond_id)
    }

    // -- mutation --------------------------------------------------------

    /// Inserts an atom, indexing its label when it has one.
    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        self.invalidate_structure();
        let label = atom.id.clone();
        let atom_id = self.atoms.insert(atom);
        self.adjacency.insert(atom_id, Vec::new());
        if !label.is_empty() {
            self.atom_labels.insert(label, atom_id);
        }
        atom_id
    }

    /// Removes an atom together with every incident bond. The severed
    /// bonds are returned so an undo journal can restore them.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<(Atom, Vec<Bond>)> {
        let atom = self.atoms.remove(atom_id)?;
        self.invalidate_structure();
        let incident: Vec<BondId> = self
            .adjacency
            .remove(atom_id)
            .map(|list| list.into_iter().map(|(bond_id, _)| bond_id).collect())
            .unwrap_or_default();
        let mut severed = Vec::new();
        for bond_id in incident {
            if let Some(bond) = self.bonds.remove(bond_id) {
                let other = if bond.start_atom == atom_id {
                    bond.end_atom
                } else {
                    bond.start_atom
                };
                if let Some(list) = self.adjacency.get_mut(other) {
                    list.retain(|&(b, _)| b != bond_id);
                }
                if !bond.id.is_empty() {
                    self.bond_labels.remove(&bond.id);
                }
                severed.push(bond);
            }
        }
        if !atom.id.is_empty() {
            self.atom_labels.remove(&atom.id);
        }
        Some((atom, severed))
    }

    /// Inserts a bond. Returns `None` when an endpoint is missing, the
    /// bond would be a self loop, or the pair is already bonded.
    pub fn add_bond(&mut self, bond: Bond) -> Option<BondId> {
        if bond.start_atom == bond.end_atom {
            return None;
        }
        if !self.atoms.contains_key(bond.start_atom) || !self.atoms.contains_key(bond.end_atom) {
            return None;
        }
        if self.bond_between(bond.start_atom, bond.end_atom).is_some() {
            return None;
        }
        self.invalidate_structure();
        let label = bond.id.clone();
        let (start, end) = (bond.start_atom, bond.end_atom);
        let bond_id = self.bonds.insert(bond);
        if let Some(list) = self.adjacency.get_mut(start) {
            list.push((bond_id, end));
        }
        if let Some(list) = self.adjacency.get_mut(end) {
            list.push((bond_id, start));
        }
        if !label.is_empty() {
            self.bond_labels.insert(label, bond_id);
        }
        Some(bond_id)
    }

    /// Convenience wrapper over [`Molecule::add_bond`].
    pub fn add_bond_between(
        &mut self,
        start: AtomId,
        end: AtomId,
        order: BondOrder,
    ) -> Option<BondId> {
        self.add_bond(Bond::new(start, end, order))
    }

    pub fn remove_bond(&mut self, bond_id: BondId) -> Option<Bond> {
        let bond = self.bonds.remove(bond_id)?;
        self.invalidate_structure();
        for endpoint in [bond.start_atom, bond.end_atom] {
            if let Some(list) = self.adjacency.get_mut(endpoint) {
                list.retain(|&(b, _)| b != bond_id);
            }
        }
        if !bond.id.is_empty() {
            self.bond_labels.remove(&bond.id);
        }
        Some(bond)
    }

    /// Mutable access to an atom. Derived-value caches are invalidated
    /// eagerly since the caller may change anything.
    pub fn atom_mut(&mut self, atom_id: AtomId) -> Option<&mut Atom> {
        if !self.atoms.contains_key(atom_id) {
            return None;
        }
        self.invalidate_derived();
        self.atoms.get_mut(atom_id)
    }

    /// Moves an atom to a new position. Returns `false` when the atom is
    /// not in this molecule.
    pub fn set_atom_position(&mut self, atom_id: AtomId, position: Point2<f64>) -> bool {
        match self.atom_mut(atom_id) {
            Some(atom) => {
                atom.position = position;
                true
            }
            None => false,
        }
    }

    pub fn bond_mut(&mut self, bond_id: BondId) -> Option<&mut Bond> {
        if !self.bonds.contains_key(bond_id) {
            return None;
        }
        self.invalidate_derived();
        self.bonds.get_mut(bond_id)
    }

    /// Re-labels an atom, keeping the label index in sync.
    pub fn set_atom_label(&mut self, atom_id: AtomId, label: String) {
        if let Some(atom) = self.atoms.get_mut(atom_id) {
            if !atom.id.is_empty() {
                self.atom_labels.remove(&atom.id);
            }
            atom.id = label.clone();
            self.atom_labels.insert(label, atom_id);
        }
    }

    pub fn set_bond_label(&mut self, bond_id: BondId, label: String) {
        if let Some(bond) = self.bonds.get_mut(bond_id) {
            if !bond.id.is_empty() {
                self.bond_labels.remove(&bond.id);
            }
            bond.id = label.clone();
            self.bond_labels.insert(label, bond_id);
        }
    }

    /// Shifts every atom, including those of child molecules.
    pub fn translate(&mut self, delta: Vector2<f64>) {
        self.bbox_cache.take();
        for atom in self.atoms.values_mut() {
            atom.position += delta;
        }
        for child in &mut self.children {
            child.translate(delta);
        }
    }

    fn invalidate_derived(&mut self) {
        self.formula_cache.take();
        self.bbox_cache.take();
        self.sorted_rings_cache.take();
    }

    fn invalidate_structure(&mut self) {
        self.invalidate_derived();
        self.rings.clear();
        self.rings_calculated = false;
    }

    // -- ring perception -------------------------------------------------

    /// Cyclomatic ring count of the graph, assuming it is connected.
    /// Acyclic molecules always have one more atom than bond.
    pub fn theoretical_rings(&self) -> usize {
        (self.bonds.len() as isize - self.atoms.len() as isize + 1).max(0) as usize
    }

    pub fn has_rings(&self) -> bool {
        self.theoretical_rings() > 0
    }

    /// Whether the ring set is current. Acyclic molecules never need
    /// perception, so they always report `true`.
    pub fn rings_calculated(&self) -> bool {
        !self.has_rings() || self.rings_calculated
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Perceives the rings of the graph with the Figueras BFS algorithm
    /// (J. Chem. Inf. Comput. Sci. 1996, 36, 986).
    ///
    /// A working set of atoms starts as the whole graph with side chains
    /// pruned away; each pass seeds ring search at the remaining atom of
    /// highest degree and drops the found ring's atoms from the set. Ring
    /// search itself runs over the full graph, so fused systems keep
    /// finding their remaining rings after shared atoms leave the set.
    pub fn rebuild_rings(&mut self) {
        self.sorted_rings_cache.take();
        self.rings.clear();
        self.rings_calculated = true;
        if !self.has_rings() {
            return;
        }

        let mut working = self.degree_projection();
        self.prune_side_chains(&mut working);

        while !working.is_empty() {
            let Some(seed) = self.highest_degree_in(&working) else {
                break;
            };
            match self.find_ring(seed) {
                Some(ring) => {
                    for &atom_id in ring.atoms() {
                        working.remove(atom_id);
                    }
                    self.rings.push(ring);
                }
                None => {
                    working.remove(seed);
                }
            }
        }
        debug!(
            found = self.rings.len(),
            expected = self.theoretical_rings(),
            "ring perception complete"
        );
    }

    /// Ring perception variant for heavily fused systems: seeds at the
    /// lowest remaining working degree, deduplicates rings by their
    /// canonical id, and only breaks the ring at the seed before pruning
    /// again, instead of discarding all ring atoms at once.
    pub fn rebuild_rings_fused(&mut self) {
        self.sorted_rings_cache.take();
        self.rings.clear();
        self.rings_calculated = true;
        if !self.has_rings() {
            return;
        }

        let mut seen = HashSet::new();
        let mut working = self.degree_projection();
        self.prune_side_chains(&mut working);

        while !working.is_empty() {
            let Some(seed) = self.lowest_working_degree_in(&working) else {
                break;
            };
            match self.find_ring(seed) {
                Some(ring) if seen.insert(ring.unique_id(self)) => {
                    for &(_, neighbour) in self.neighbors(seed) {
                        if let Some(degree) = working.get_mut(neighbour) {
                            *degree = degree.saturating_sub(1);
                        }
                    }
                    working.remove(seed);
                    self.prune_side_chains(&mut working);
                    self.rings.push(ring);
                }
                _ => {
                    working.remove(seed);
                }
            }
        }
        debug!(
            found = self.rings.len(),
            expected = self.theoretical_rings(),
            "fused ring perception complete"
        );
    }

    /// Snapshot of every atom's degree, the starting working set for
    /// ring perception.
    fn degree_projection(&self) -> SecondaryMap<AtomId, usize> {
        let mut working = SecondaryMap::new();
        for atom_id in self.atoms.keys() {
            working.insert(atom_id, self.degree(atom_id));
        }
        working
    }

    /// First atom (arena order) of the working set with maximal full-graph
    /// degree.
    fn highest_degree_in(&self, working: &SecondaryMap<AtomId, usize>) -> Option<AtomId> {
        let mut seed = None;
        let mut best = 0;
        for atom_id in self.atoms.keys() {
            if !working.contains_key(atom_id) {
                continue;
            }
            let degree = self.degree(atom_id);
            if seed.is_none() || degree > best {
                seed = Some(atom_id);
                best = degree;
            }
        }
        seed
    }

    /// First atom (arena order) with minimal remaining working degree.
    fn lowest_working_degree_in(&self, working: &SecondaryMap<AtomId, usize>) -> Option<AtomId> {
        let mut seed = None;
        let mut best = usize::MAX;
        for atom_id in self.atoms.keys() {
            if let Some(&degree) = working.get(atom_id) {
                if degree < best {
                    seed = Some(atom_id);
                    best = degree;
                }
            }
        }
        seed
    }

    /// Repeatedly cleaves degree < 2 atoms from the working set,
    /// decrementing their neighbours' recorded degrees. Leaves only atoms
    /// that can still be part of a cycle. Does not touch the graph.
    fn prune_side_chains(&self, working: &mut SecondaryMap<AtomId, usize>) {
        loop {
            let prune: Vec<AtomId> = working
                .iter()
                .filter(|&(_, &degree)| degree < 2)
                .map(|(atom_id, _)| atom_id)
                .collect();
            if prune.is_empty() {
                break;
            }
            for atom_id in prune {
                for &(_, neighbour) in self.neighbors(atom_id) {
                    if let Some(degree) = working.get_mut(neighbour) {
                        *degree = degree.saturating_sub(1);
                    }
                }
                working.remove(atom_id);
            }
        }
    }

    /// BFS from `seed` growing a path set per atom; the first collision of
    /// two paths that share exactly one atom closes the first (smallest)
    /// ring through the seed. Returns `None` for an acyclic neighbourhood.
    fn find_ring(&self, seed: AtomId) -> Option<Ring> {
        let mut paths: SecondaryMap<AtomId, HashSet<AtomId>> = SecondaryMap::new();
        let mut queue: VecDeque<(AtomId, AtomId)> = VecDeque::new();

        for &(_, neighbour) in self.neighbors(seed) {
            paths.insert(neighbour, HashSet::from([seed, neighbour]));
            queue.push_back((neighbour, seed));
        }

        while let Some((current, source)) = queue.pop_front() {
            let current_path = match paths.get(current) {
                Some(path) => path.clone(),
                None => continue,
            };
            for &(_, next) in self.neighbors(current) {
                if next == source {
                    continue;
                }
                match paths.get(next) {
                    None => {
                        let mut extended = current_path.clone();
                        extended.insert(next);
                        paths.insert(next, extended);
                        queue.push_back((next, current));
                    }
                    Some(existing) => {
                        if current_path.intersection(existing).count() == 1 {
                            let mut atoms: Vec<AtomId> =
                                current_path.union(existing).copied().collect();
                            atoms.sort_unstable();
                            return Some(Ring::new(atoms));
                        }
                    }
                }
            }
        }
        None
    }

    /// Rings sorted for double bond placement, cached until the ring set
    /// or any bond changes.
    pub fn sorted_rings(&self) -> &[Ring] {
        self.sorted_rings_cache
            .get_or_init(|| self.sort_rings_for_db_placement())
    }

    /// Orders the recognized small rings for double bond placement
    /// following Clark (DOI: 10.1002/minf.201200171): prefer ring sizes
    /// 6, 5, 7, 4, 3, then rings whose atoms are shared with fewest other
    /// rings, then rings already holding the most double bonds. Each pass
    /// is a stable sort, so earlier keys break ties in later ones.
    pub fn sort_rings_for_db_placement(&self) -> Vec<Ring> {
        let mut membership: SecondaryMap<AtomId, usize> = SecondaryMap::new();
        for ring in &self.rings {
            for &atom_id in ring.atoms() {
                let count = membership.get(atom_id).copied().unwrap_or(0);
                membership.insert(atom_id, count + 1);
            }
        }

        let mut sorted: Vec<Ring> = self
            .rings
            .iter()
            .filter(|ring| ring.priority() > 0)
            .cloned()
            .collect();
        sorted.sort_by_key(|ring| ring.priority());
        sorted.sort_by_key(|ring| {
            ring.atoms()
                .iter()
                .map(|&atom_id| membership.get(atom_id).copied().unwrap_or(0))
                .sum::<usize>()
        });
        sorted.sort_by(|a, b| b.double_bond_count(self).cmp(&a.double_bond_count(self)));
        sorted
    }

    pub fn is_cyclic(&self, bond_id: BondId) -> bool {
        self.rings_containing_bond(bond_id).next().is_some()
    }

    pub fn rings_containing_bond(&self, bond_id: BondId) -> impl Iterator<Item = &Ring> {
        let endpoints = self.bond(bond_id).map(|b| (b.start_atom, b.end_atom));
        self.rings.iter().filter(move |ring| {
            endpoints.is_some_and(|(start, end)| ring.contains(start) && ring.contains(end))
        })
    }

    /// The ring whose centroid decides where a cyclic double bond's
    /// subsidiary line goes: the first placement-sorted ring containing
    /// the bond.
    pub fn primary_ring(&self, bond_id: BondId) -> Option<&Ring> {
        let bond = self.bond(bond_id)?;
        self.sorted_rings()
            .iter()
            .find(|ring| ring.contains(bond.start_atom) && ring.contains(bond.end_atom))
    }

    // -- derived values --------------------------------------------------

    /// Hydrogens drawn implicitly next to the atom symbol: the element's
    /// normal valency minus the (rounded up) sum of incident bond orders,
    /// never negative. `None` when the atom or its element is unknown.
    pub fn implicit_hydrogen_count(&self, atom_id: AtomId) -> Option<u32> {
        let atom = self.atom(atom_id)?;
        let element = atom.element?;
        let order_sum: f64 = self
            .neighbors(atom_id)
            .iter()
            .filter_map(|&(bond_id, _)| self.bond(bond_id))
            .map(|bond| bond.order.value())
            .sum();
        let count = element.normal_valency as i64 - order_sum.ceil() as i64;
        Some(count.max(0) as u32)
    }

    /// Space-separated element counts with implicit hydrogens included,
    /// carbon first, hydrogen second, the rest alphabetical: `"C 6 H 6"`.
    /// Atoms with unknown elements are skipped. Cached.
    pub fn concise_formula(&self) -> &str {
        self.formula_cache.get_or_init(|| self.compute_formula())
    }

    fn compute_formula(&self) -> String {
        let mut carbon = 0u32;
        let mut hydrogen = 0u32;
        let mut rest: BTreeMap<&str, u32> = BTreeMap::new();
        for (atom_id, atom) in self.atoms.iter() {
            let Some(element) = atom.element else {
                continue;
            };
            match element.symbol {
                "C" => carbon += 1,
                "H" => hydrogen += 1,
                symbol => *rest.entry(symbol).or_insert(0) += 1,
            }
            hydrogen += self.implicit_hydrogen_count(atom_id).unwrap_or(0);
        }
        let mut parts = Vec::new();
        if carbon > 0 {
            parts.push(format!("C {carbon}"));
        }
        if hydrogen > 0 {
            parts.push(format!("H {hydrogen}"));
        }
        for (symbol, count) in rest {
            parts.push(format!("{symbol} {count}"));
        }
        parts.join(" ")
    }

    /// Bounding box over this molecule's atoms and all its children, or
    /// `None` when there are no atoms anywhere. The own-atom rectangle is
    /// cached.
    pub fn bounding_box(&self) -> Option<Rect> {
        let own = *self
            .bbox_cache
            .get_or_init(|| Rect::from_points(self.atoms.values().map(|a| a.position)));
        self.children
            .iter()
            .filter_map(|child| child.bounding_box())
            .fold(own, |acc, rect| {
                Some(acc.map_or(rect, |a| a.union(&rect)))
            })
    }

    /// Convex hull over the positions of this molecule's atoms and all
    /// its children, counter-clockwise.
    pub fn convex_hull(&self) -> Vec<Point2<f64>> {
        let mut positions = Vec::new();
        self.collect_positions(&mut positions);
        hull::convex_hull(&positions)
    }

    fn collect_positions(&self, out: &mut Vec<Point2<f64>>) {
        out.extend(self.atoms.values().map(|a| a.position));
        for child in &self.children {
            child.collect_positions(out);
        }
    }

    /// Mean geometric bond length over this molecule and its children, or
    /// `None` when no bonds exist.
    pub fn mean_bond_length(&self) -> Option<f64> {
        let mut total = 0.0;
        let mut count = 0usize;
        self.accumulate_bond_lengths(&mut total, &mut count);
        (count > 0).then(|| total / count as f64)
    }

    pub(crate) fn accumulate_bond_lengths(&self, total: &mut f64, count: &mut usize) {
        for bond in self.bonds.values() {
            if let (Some(start), Some(end)) = (self.atom(bond.start_atom), self.atom(bond.end_atom))
            {
                *total += (end.position - start.position).norm();
                *count += 1;
            }
        }
        for child in &self.children {
            child.accumulate_bond_lengths(total, count);
        }
    }

    /// Arithmetic mean of the own atoms' positions.
    pub fn centroid(&self) -> Option<Point2<f64>> {
        let positions: Vec<Point2<f64>> = self.atoms.values().map(|a| a.position).collect();
        geometry::centroid(&positions)
    }

    // -- refresh ---------------------------------------------------------

    /// Rebuilds the molecule after a batch of edits: splits off any
    /// disconnected components as new molecules, re-perceives rings, and
    /// recursively refreshes children, adopting their spin-offs and
    /// dropping any that ended up empty.
    ///
    /// The returned molecules are components no longer connected to this
    /// one; the caller (the model, or a parent molecule) must adopt them.
    pub fn refresh(&mut self) -> Vec<Molecule> {
        let spun_off = match self.atoms.keys().next() {
            Some(seed) => self.refresh_from(seed),
            None => {
                self.rings.clear();
                self.rings_calculated = true;
                self.invalidate_derived();
                Vec::new()
            }
        };

        let mut kept = Vec::new();
        for mut child in std::mem::take(&mut self.children) {
            if child.atom_count() == 0 && child.children.is_empty() {
                continue;
            }
            let grandchildren = child.refresh();
            kept.push(child);
            kept.extend(grandchildren);
        }
        self.children = kept;
        spun_off
    }

    /// As [`Molecule::refresh`] for the own graph only, keeping the
    /// component containing `seed` in place.
    ///
    /// Panics if `seed` is not an atom of this molecule.
    pub fn refresh_from(&mut self, seed: AtomId) -> Vec<Molecule> {
        assert!(
            self.atoms.contains_key(seed),
            "refresh seed must belong to the molecule"
        );
        let mut reached = HashSet::new();
        self.collect_component(seed, &mut reached);

        let mut spun_off = Vec::new();
        loop {
            let Some(stray) = self.atoms.keys().find(|id| !reached.contains(id)) else {
                break;
            };
            let mut component = HashSet::new();
            self.collect_component(stray, &mut component);
            let members: Vec<AtomId> = self
                .atoms
                .keys()
                .filter(|id| component.contains(id))
                .collect();
            spun_off.push(self.extract_component(&members));
        }

        self.invalidate_derived();
        self.rebuild_rings();
        if !spun_off.is_empty() {
            debug!(components = spun_off.len() + 1, "molecule split on refresh");
        }
        spun_off
    }

    fn collect_component(&self, seed: AtomId, visited: &mut HashSet<AtomId>) {
        let mut stack = vec![seed];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            for &(_, neighbour) in self.neighbors(current) {
                if !visited.contains(&neighbour) {
                    stack.push(neighbour);
                }
            }
        }
    }

    /// Moves a connected component into a fresh molecule, remapping bond
    /// endpoints onto the new arena keys. Labels move with the entities.
    fn extract_component(&mut self, members: &[AtomId]) -> Molecule {
        let member_set: HashSet<AtomId> = members.iter().copied().collect();
        let component_bonds: Vec<Bond> = self
            .bonds
            .values()
            .filter(|bond| member_set.contains(&bond.start_atom))
            .cloned()
            .collect();

        let mut part = Molecule::new();
        let mut key_map: SecondaryMap<AtomId, AtomId> = SecondaryMap::new();
        for &atom_id in members {
            if let Some((atom, _)) = self.remove_atom(atom_id) {
                let new_id = part.add_atom(atom);
                key_map.insert(atom_id, new_id);
            }
        }
        for mut bond in component_bonds {
            let (Some(&start), Some(&end)) =
                (key_map.get(bond.start_atom), key_map.get(bond.end_atom))
            else {
                continue;
            };
            bond.start_atom = start;
            bond.end_atom = end;
            let _ = part.add_bond(bond);
        }
        part.rebuild_rings();
        part
    }
}
