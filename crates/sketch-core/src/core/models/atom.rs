use super::element::Element;
use nalgebra::Point2;

/// A node of the molecular graph.
///
/// Atoms are owned by their molecule's arena; incident-bond bookkeeping lives
/// on the molecule (its adjacency cache), never on the atom, so there is no
/// back-reference to keep consistent here. `element` is `None` when the atom
/// was imported with an unrecognized symbol: downstream geometry and formula
/// code must tolerate that rather than assume every atom resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Stable label unique within the owning molecule (e.g. `a1`), assigned
    /// by [`Model::relabel`](super::model::Model::relabel) and preserved
    /// across undo/redo round trips.
    pub id: String,
    pub element: Option<&'static Element>,
    /// 2D sketch coordinates, in model units.
    pub position: Point2<f64>,
    pub formal_charge: Option<i32>,
    pub isotope_number: Option<u32>,
}

impl Atom {
    /// Creates a new atom at the given position with default chemistry.
    pub fn new(element: Option<&'static Element>, position: Point2<f64>) -> Self {
        Self {
            id: String::new(),
            element,
            position,
            formal_charge: None,
            isotope_number: None,
        }
    }

    /// Formats the charge annotation drawn next to the atom symbol:
    /// `"+"`, `"-"`, `"2+"`, `"3-"`, or `""` for an uncharged atom.
    pub fn charge_annotation(&self) -> String {
        let charge = self.formal_charge.unwrap_or(0);
        let sign = match charge {
            c if c > 0 => "+",
            c if c < 0 => "-",
            _ => return String::new(),
        };
        let magnitude = charge.abs();
        if magnitude > 1 {
            format!("{}{}", magnitude, sign)
        } else {
            sign.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(element::element("C"), Point2::new(1.0, 2.0));
        assert_eq!(atom.id, "");
        assert_eq!(atom.element.unwrap().symbol, "C");
        assert_eq!(atom.position, Point2::new(1.0, 2.0));
        assert_eq!(atom.formal_charge, None);
        assert_eq!(atom.isotope_number, None);
    }

    #[test]
    fn atom_tolerates_missing_element() {
        let atom = Atom::new(None, Point2::origin());
        assert!(atom.element.is_none());
    }

    #[test]
    fn charge_annotation_formats_signs_and_magnitudes() {
        let mut atom = Atom::new(element::element("N"), Point2::origin());
        assert_eq!(atom.charge_annotation(), "");

        atom.formal_charge = Some(1);
        assert_eq!(atom.charge_annotation(), "+");

        atom.formal_charge = Some(-1);
        assert_eq!(atom.charge_annotation(), "-");

        atom.formal_charge = Some(2);
        assert_eq!(atom.charge_annotation(), "2+");

        atom.formal_charge = Some(-3);
        assert_eq!(atom.charge_annotation(), "3-");

        atom.formal_charge = Some(0);
        assert_eq!(atom.charge_annotation(), "");
    }

    #[test]
    fn atom_clone_is_independent() {
        let mut original = Atom::new(element::element("O"), Point2::new(4.0, 5.0));
        let clone = original.clone();
        original.position = Point2::new(9.0, 9.0);
        assert_eq!(clone.position, Point2::new(4.0, 5.0));
    }
}
