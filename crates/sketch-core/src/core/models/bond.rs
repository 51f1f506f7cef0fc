use super::ids::AtomId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Bond order, carried as an enum tag with a numeric value for arithmetic.
///
/// The numeric value is what order-sum and geometry code branch on; the tag
/// is what gets round-tripped through CML (`"1"`, `"2"`, `"A"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    /// A partial (order < 1) bond, drawn dashed.
    Partial,
    #[default]
    Single,
    Aromatic,
    Double,
    Triple,
}

impl BondOrder {
    /// Numeric order value: 0.5, 1.0, 1.5, 2.0, or 3.0.
    pub fn value(&self) -> f64 {
        match self {
            Self::Partial => 0.5,
            Self::Single => 1.0,
            Self::Aromatic => 1.5,
            Self::Double => 2.0,
            Self::Triple => 3.0,
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0.5" | "partial" | "hbond" => Ok(Self::Partial),
            "1" | "s" | "single" => Ok(Self::Single),
            "1.5" | "a" | "ar" | "aromatic" => Ok(Self::Aromatic),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Partial => "0.5",
                Self::Single => "1",
                Self::Aromatic => "1.5",
                Self::Double => "2",
                Self::Triple => "3",
            }
        )
    }
}

/// Stereochemistry descriptor drawn on a bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondStereo {
    #[default]
    None,
    /// Solid wedge, narrow end at the start atom.
    Wedge,
    /// Hatched wedge, narrow end at the start atom.
    Hatch,
    Cis,
    Trans,
    /// Unknown configuration; order-1 bonds render wavy, doubles crossed.
    Indeterminate,
}

/// Explicit side preference for the subsidiary line of a double bond,
/// relative to the start→end bond vector. Used when ring geometry alone
/// cannot decide the side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondPlacement {
    Clockwise,
    Anticlockwise,
}

/// An edge of the molecular graph.
///
/// Endpoint order is chemically insignificant but must stay stable: wedge
/// and hatch descriptors are anchored at `start_atom`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// Stable label unique within the owning molecule (e.g. `b1`).
    pub id: String,
    pub start_atom: AtomId,
    pub end_atom: AtomId,
    pub order: BondOrder,
    pub stereo: BondStereo,
    pub placement: Option<BondPlacement>,
}

impl Bond {
    pub fn new(start_atom: AtomId, end_atom: AtomId, order: BondOrder) -> Self {
        Self {
            id: String::new(),
            start_atom,
            end_atom,
            order,
            stereo: BondStereo::None,
            placement: None,
        }
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.start_atom == atom_id || self.end_atom == atom_id
    }

    /// The endpoint opposite `atom_id`, or `None` if the bond does not
    /// touch that atom.
    pub fn other_end(&self, atom_id: AtomId) -> Option<AtomId> {
        if atom_id == self.start_atom {
            Some(self.end_atom)
        } else if atom_id == self.end_atom {
            Some(self.start_atom)
        } else {
            None
        }
    }

    /// True when the two bonds join the same pair of atoms, in either
    /// direction. Used to enforce the one-bond-per-pair invariant.
    pub fn joins_same_pair(&self, other_start: AtomId, other_end: AtomId) -> bool {
        (self.start_atom == other_start && self.end_atom == other_end)
            || (self.start_atom == other_end && self.end_atom == other_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn bond_order_from_str_parses_valid_strings() {
        assert_eq!("1".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("single".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("S".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("2".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("D".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("3".parse::<BondOrder>().unwrap(), BondOrder::Triple);
        assert_eq!("T".parse::<BondOrder>().unwrap(), BondOrder::Triple);
        assert_eq!("A".parse::<BondOrder>().unwrap(), BondOrder::Aromatic);
        assert_eq!("1.5".parse::<BondOrder>().unwrap(), BondOrder::Aromatic);
        assert_eq!("0.5".parse::<BondOrder>().unwrap(), BondOrder::Partial);
    }

    #[test]
    fn bond_order_from_str_rejects_invalid_strings() {
        assert!("".parse::<BondOrder>().is_err());
        assert!("quadruple".parse::<BondOrder>().is_err());
        assert!("4".parse::<BondOrder>().is_err());
    }

    #[test]
    fn bond_order_value_matches_tag() {
        assert_eq!(BondOrder::Partial.value(), 0.5);
        assert_eq!(BondOrder::Single.value(), 1.0);
        assert_eq!(BondOrder::Aromatic.value(), 1.5);
        assert_eq!(BondOrder::Double.value(), 2.0);
        assert_eq!(BondOrder::Triple.value(), 3.0);
    }

    #[test]
    fn bond_order_display_round_trips() {
        for order in [
            BondOrder::Partial,
            BondOrder::Single,
            BondOrder::Aromatic,
            BondOrder::Double,
            BondOrder::Triple,
        ] {
            assert_eq!(order.to_string().parse::<BondOrder>().unwrap(), order);
        }
    }

    #[test]
    fn bond_order_default_is_single() {
        assert_eq!(BondOrder::default(), BondOrder::Single);
    }

    #[test]
    fn bond_contains_and_other_end() {
        let a1 = dummy_atom_id(1);
        let a2 = dummy_atom_id(2);
        let unrelated = dummy_atom_id(3);
        let bond = Bond::new(a1, a2, BondOrder::Double);

        assert!(bond.contains(a1));
        assert!(bond.contains(a2));
        assert!(!bond.contains(unrelated));

        assert_eq!(bond.other_end(a1), Some(a2));
        assert_eq!(bond.other_end(a2), Some(a1));
        assert_eq!(bond.other_end(unrelated), None);
    }

    #[test]
    fn joins_same_pair_is_direction_insensitive() {
        let a1 = dummy_atom_id(10);
        let a2 = dummy_atom_id(20);
        let bond = Bond::new(a1, a2, BondOrder::Single);
        assert!(bond.joins_same_pair(a1, a2));
        assert!(bond.joins_same_pair(a2, a1));
        assert!(!bond.joins_same_pair(a1, dummy_atom_id(30)));
    }
}
