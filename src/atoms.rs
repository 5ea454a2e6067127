//! Atom representation and element-derived property tables.

use nalgebra as na;

/// Atom names that form the repeating protein backbone.
pub const BACKBONE_ATOMS: [&str; 4] = ["CA", "C", "O", "N"];

/// Backbone atoms plus the hydrogens and terminal oxygen that are excluded
/// from the side chain.
pub const BACKBONE_FULL_ATOMS: [&str; 9] =
    ["CA", "C", "O", "N", "H", "H1", "H2", "H3", "OXT"];

/// Van der Waals radius in Ångströms for an element symbol.
///
/// Unmapped elements get a radius of 0.0, which reduces the minvdw metric to
/// a plain center-to-center distance for those atoms.
pub fn vdw_radius(element: char) -> f64 {
    match element {
        'N' => 1.55,
        'C' => 1.70,
        'H' => 1.20,
        'O' => 1.52,
        'S' => 1.85,
        _ => 0.0,
    }
}

/// Standard atomic mass for an element symbol, 0.0 for unmapped elements.
pub fn atomic_mass(element: char) -> f64 {
    match element {
        'H' => 1.008,
        'C' => 12.011,
        'N' => 14.007,
        'O' => 15.999,
        'P' => 30.974,
        'S' => 32.06,
        _ => 0.0,
    }
}

/// A single atom with its coordinate and element identity.
///
/// The element is the first alphabetic character of the atom name, uppercased.
/// This is the PDB atom-naming convention the radius and mass tables are
/// keyed on ("CA" is a carbon, "OXT" an oxygen, "1HB" a hydrogen).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom name as it appears in the structure file (e.g. "CA", "CB", "N")
    pub name: String,
    /// Cartesian coordinates in Ångströms
    pub coord: na::Vector3<f64>,
    /// Element symbol derived from the atom name
    pub element: char,
}

impl Atom {
    /// Create an atom, deriving the element from the name.
    pub fn new(name: &str, coord: na::Vector3<f64>) -> Self {
        let element = name
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('\0');
        Self {
            name: name.to_string(),
            coord,
            element,
        }
    }

    /// Atomic mass of this atom's element, 0.0 if unknown.
    pub fn mass(&self) -> f64 {
        atomic_mass(self.element)
    }

    /// Van der Waals radius of this atom's element, 0.0 if unknown.
    pub fn vdw_radius(&self) -> f64 {
        vdw_radius(self.element)
    }

    /// Whether this atom is one of the four backbone atoms.
    pub fn is_backbone(&self) -> bool {
        BACKBONE_ATOMS.contains(&self.name.as_str())
    }

    /// Whether this atom belongs to the side chain, i.e. it is neither a
    /// backbone atom nor a backbone hydrogen/terminal oxygen.
    pub fn is_sidechain(&self) -> bool {
        !BACKBONE_FULL_ATOMS.contains(&self.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Atom {
        Atom::new(name, na::Vector3::zeros())
    }

    #[test]
    fn element_is_first_alphabetic_char() {
        assert_eq!(atom("CA").element, 'C');
        assert_eq!(atom("OXT").element, 'O');
        assert_eq!(atom("1HB").element, 'H');
        assert_eq!(atom("sg").element, 'S');
    }

    #[test]
    fn backbone_classification() {
        for name in ["CA", "C", "O", "N"] {
            assert!(atom(name).is_backbone(), "{name} should be backbone");
            assert!(!atom(name).is_sidechain(), "{name} should not be sidechain");
        }

        // Sidechain atoms
        for name in ["CB", "CG", "SD", "OG1", "NZ"] {
            assert!(!atom(name).is_backbone(), "{name} should not be backbone");
            assert!(atom(name).is_sidechain(), "{name} should be sidechain");
        }

        // Backbone hydrogens and the terminal oxygen are in neither group
        for name in ["H", "H1", "H2", "H3", "OXT"] {
            assert!(!atom(name).is_backbone());
            assert!(!atom(name).is_sidechain());
        }
    }

    #[test]
    fn property_tables() {
        assert_eq!(vdw_radius('C'), 1.70);
        assert_eq!(vdw_radius('S'), 1.85);
        assert_eq!(vdw_radius('X'), 0.0);

        assert_eq!(atomic_mass('N'), 14.007);
        assert_eq!(atomic_mass('X'), 0.0);
    }
}
