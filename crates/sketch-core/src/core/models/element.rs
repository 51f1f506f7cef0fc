use phf::{Map, phf_map};

/// Static reference data for a chemical element.
///
/// Entries live in a compile-time table and are shared by reference: an atom
/// never owns its element, it points at one of these records. `normal_valency`
/// is the bonding capacity used for implicit hydrogen derivation; it is zero
/// for elements where implicit hydrogens are not drawn (metals, noble gases).
#[derive(Debug, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub atomic_number: u8,
    pub atomic_weight: f64,
    pub normal_valency: u8,
    /// CPK-style display colour, as a `#rrggbb` string.
    pub colour: &'static str,
}

#[rustfmt::skip]
static PERIODIC_TABLE: Map<&'static str, Element> = phf_map! {
    "H"  => Element { symbol: "H",  atomic_number: 1,  atomic_weight: 1.008,   normal_valency: 1, colour: "#ffffff" },
    "He" => Element { symbol: "He", atomic_number: 2,  atomic_weight: 4.003,   normal_valency: 0, colour: "#d9ffff" },
    "Li" => Element { symbol: "Li", atomic_number: 3,  atomic_weight: 6.941,   normal_valency: 1, colour: "#cc80ff" },
    "Be" => Element { symbol: "Be", atomic_number: 4,  atomic_weight: 9.012,   normal_valency: 2, colour: "#c2ff00" },
    "B"  => Element { symbol: "B",  atomic_number: 5,  atomic_weight: 10.811,  normal_valency: 3, colour: "#ffb5b5" },
    "C"  => Element { symbol: "C",  atomic_number: 6,  atomic_weight: 12.011,  normal_valency: 4, colour: "#000000" },
    "N"  => Element { symbol: "N",  atomic_number: 7,  atomic_weight: 14.007,  normal_valency: 3, colour: "#304ff7" },
    "O"  => Element { symbol: "O",  atomic_number: 8,  atomic_weight: 15.999,  normal_valency: 2, colour: "#ff0d0d" },
    "F"  => Element { symbol: "F",  atomic_number: 9,  atomic_weight: 18.998,  normal_valency: 1, colour: "#90e050" },
    "Ne" => Element { symbol: "Ne", atomic_number: 10, atomic_weight: 20.180,  normal_valency: 0, colour: "#b3e3f5" },
    "Na" => Element { symbol: "Na", atomic_number: 11, atomic_weight: 22.990,  normal_valency: 1, colour: "#ab5cf2" },
    "Mg" => Element { symbol: "Mg", atomic_number: 12, atomic_weight: 24.305,  normal_valency: 2, colour: "#8aff00" },
    "Al" => Element { symbol: "Al", atomic_number: 13, atomic_weight: 26.982,  normal_valency: 3, colour: "#bfa6a6" },
    "Si" => Element { symbol: "Si", atomic_number: 14, atomic_weight: 28.086,  normal_valency: 4, colour: "#f0c8a0" },
    "P"  => Element { symbol: "P",  atomic_number: 15, atomic_weight: 30.974,  normal_valency: 3, colour: "#ff8000" },
    "S"  => Element { symbol: "S",  atomic_number: 16, atomic_weight: 32.066,  normal_valency: 2, colour: "#ffff30" },
    "Cl" => Element { symbol: "Cl", atomic_number: 17, atomic_weight: 35.453,  normal_valency: 1, colour: "#1ff01f" },
    "Ar" => Element { symbol: "Ar", atomic_number: 18, atomic_weight: 39.948,  normal_valency: 0, colour: "#80d1e3" },
    "K"  => Element { symbol: "K",  atomic_number: 19, atomic_weight: 39.098,  normal_valency: 1, colour: "#8f40d4" },
    "Ca" => Element { symbol: "Ca", atomic_number: 20, atomic_weight: 40.078,  normal_valency: 2, colour: "#3dff00" },
    "Ti" => Element { symbol: "Ti", atomic_number: 22, atomic_weight: 47.867,  normal_valency: 0, colour: "#bfc2c7" },
    "Cr" => Element { symbol: "Cr", atomic_number: 24, atomic_weight: 51.996,  normal_valency: 0, colour: "#8a99c7" },
    "Mn" => Element { symbol: "Mn", atomic_number: 25, atomic_weight: 54.938,  normal_valency: 0, colour: "#9c7ac7" },
    "Fe" => Element { symbol: "Fe", atomic_number: 26, atomic_weight: 55.845,  normal_valency: 0, colour: "#e06633" },
    "Co" => Element { symbol: "Co", atomic_number: 27, atomic_weight: 58.933,  normal_valency: 0, colour: "#f090a0" },
    "Ni" => Element { symbol: "Ni", atomic_number: 28, atomic_weight: 58.693,  normal_valency: 0, colour: "#50d050" },
    "Cu" => Element { symbol: "Cu", atomic_number: 29, atomic_weight: 63.546,  normal_valency: 0, colour: "#c88033" },
    "Zn" => Element { symbol: "Zn", atomic_number: 30, atomic_weight: 65.39,   normal_valency: 0, colour: "#7d80b0" },
    "As" => Element { symbol: "As", atomic_number: 33, atomic_weight: 74.922,  normal_valency: 3, colour: "#bd80e3" },
    "Se" => Element { symbol: "Se", atomic_number: 34, atomic_weight: 78.96,   normal_valency: 2, colour: "#ffa100" },
    "Br" => Element { symbol: "Br", atomic_number: 35, atomic_weight: 79.904,  normal_valency: 1, colour: "#a62929" },
    "Mo" => Element { symbol: "Mo", atomic_number: 42, atomic_weight: 95.94,   normal_valency: 0, colour: "#54b5b5" },
    "Pd" => Element { symbol: "Pd", atomic_number: 46, atomic_weight: 106.42,  normal_valency: 0, colour: "#006985" },
    "Ag" => Element { symbol: "Ag", atomic_number: 47, atomic_weight: 107.868, normal_valency: 0, colour: "#c0c0c0" },
    "Sn" => Element { symbol: "Sn", atomic_number: 50, atomic_weight: 118.710, normal_valency: 4, colour: "#668080" },
    "I"  => Element { symbol: "I",  atomic_number: 53, atomic_weight: 126.904, normal_valency: 1, colour: "#940094" },
    "W"  => Element { symbol: "W",  atomic_number: 74, atomic_weight: 183.84,  normal_valency: 0, colour: "#2194d6" },
    "Pt" => Element { symbol: "Pt", atomic_number: 78, atomic_weight: 195.078, normal_valency: 0, colour: "#d0d0e0" },
    "Au" => Element { symbol: "Au", atomic_number: 79, atomic_weight: 196.967, normal_valency: 0, colour: "#ffd123" },
    "Hg" => Element { symbol: "Hg", atomic_number: 80, atomic_weight: 200.59,  normal_valency: 0, colour: "#b8b8d0" },
    "Pb" => Element { symbol: "Pb", atomic_number: 82, atomic_weight: 207.2,   normal_valency: 4, colour: "#575961" },
};

/// Looks up an element by its case-sensitive symbol.
///
/// Returns `None` for unrecognized symbols; importers keep the atom with
/// `element == None` and record a warning rather than failing the load.
pub fn element(symbol: &str) -> Option<&'static Element> {
    PERIODIC_TABLE.get(symbol.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_common_elements() {
        let carbon = element("C").unwrap();
        assert_eq!(carbon.symbol, "C");
        assert_eq!(carbon.atomic_number, 6);
        assert_eq!(carbon.normal_valency, 4);

        let chlorine = element("Cl").unwrap();
        assert_eq!(chlorine.atomic_number, 17);
        assert_eq!(chlorine.normal_valency, 1);
    }

    #[test]
    fn lookup_trims_surrounding_whitespace() {
        assert_eq!(element(" N ").unwrap().symbol, "N");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        // "CO" would be ambiguous between carbon monoxide and cobalt
        assert!(element("c").is_none());
        assert!(element("CL").is_none());
        assert_eq!(element("Co").unwrap().atomic_number, 27);
    }

    #[test]
    fn lookup_rejects_unknown_symbols() {
        assert!(element("Xx").is_none());
        assert!(element("").is_none());
    }

    #[test]
    fn metals_have_no_normal_valency() {
        assert_eq!(element("Fe").unwrap().normal_valency, 0);
        assert_eq!(element("Pt").unwrap().normal_valency, 0);
    }
}
