//! Residue representation: atom lookup, backbone/side-chain views,
//! virtual-atom reconstruction and mass-weighted centroids.

use crate::atoms::Atom;
use crate::errors::DistanceError;
use crate::geometry::rotate_about_axis;
use nalgebra as na;

/// An amino-acid residue as an ordered collection of atoms.
///
/// Atom order matches the structure-file order. Residues are read-only once
/// built from the parsed structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// Three-letter residue name (e.g. "GLY", "ALA")
    pub resn: String,
    /// Residue sequence number from the structure file
    pub resi: isize,
    /// Atoms in file order
    pub atoms: Vec<Atom>,
}

impl Residue {
    /// Create a residue from its name, sequence number and atoms.
    pub fn new(resn: &str, resi: isize, atoms: Vec<Atom>) -> Self {
        Self {
            resn: resn.to_string(),
            resi,
            atoms,
        }
    }

    /// Look up an atom by name. Returns `None` when the atom is absent,
    /// e.g. "CB" in glycine.
    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name == name)
    }

    /// Iterate over the backbone atoms (CA, C, O, N) in file order.
    pub fn backbone_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter(|a| a.is_backbone())
    }

    /// Iterate over the side-chain atoms in file order.
    pub fn sidechain_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter(|a| a.is_sidechain())
    }

    /// Coordinate of the named atom, reconstructing a virtual CB when needed.
    ///
    /// If a "CB" atom is requested but absent (glycine), a virtual CB is
    /// built from the backbone: the CA->N vector is rotated by -120 degrees
    /// about the CA->C axis and added to the CA coordinate, matching the
    /// tetrahedral geometry of a generic side chain. Any other missing atom
    /// fails with [`DistanceError::UnsupportedAtom`] since no reconstruction
    /// rule exists for it.
    pub fn atom_coord(&self, name: &str) -> Result<na::Vector3<f64>, DistanceError> {
        if let Some(atom) = self.atom(name) {
            return Ok(atom.coord);
        }

        if name != "CB" {
            return Err(self.unsupported_atom(name));
        }

        let n = self.atom("N").ok_or_else(|| self.unsupported_atom("N"))?;
        let ca = self.atom("CA").ok_or_else(|| self.unsupported_atom("CA"))?;
        let c = self.atom("C").ok_or_else(|| self.unsupported_atom("C"))?;

        let ca_n = n.coord - ca.coord;
        let ca_c = c.coord - ca.coord;
        let virtual_cb = rotate_about_axis(&ca_n, &ca_c, -120f64.to_radians());

        Ok(ca.coord + virtual_cb)
    }

    /// Mass-weighted centroid of the residue's atoms, or only its side-chain
    /// atoms when `sidechain_only` is set.
    ///
    /// Returns `None` when no atoms match the selection (or when the total
    /// mass is zero because every element is unknown), leaving the fallback
    /// policy to the caller instead of producing NaNs.
    pub fn center_of_mass(&self, sidechain_only: bool) -> Option<na::Vector3<f64>> {
        let mut weighted = na::Vector3::zeros();
        let mut total_mass = 0.0;

        for atom in self
            .atoms
            .iter()
            .filter(|a| !sidechain_only || a.is_sidechain())
        {
            weighted += atom.mass() * atom.coord;
            total_mass += atom.mass();
        }

        if total_mass > 0.0 {
            Some(weighted / total_mass)
        } else {
            None
        }
    }

    fn unsupported_atom(&self, name: &str) -> DistanceError {
        DistanceError::UnsupportedAtom {
            atom: name.to_string(),
            resn: self.resn.clone(),
            resi: self.resi,
        }
    }
}

/// The one-letter code for a three-letter amino-acid name, or `None` if the
/// name is not one of the twenty standard amino acids.
pub fn three_to_one(resn: &str) -> Option<&'static str> {
    let aa_code = match resn.to_uppercase().as_str() {
        "ALA" => "A",
        "ARG" => "R",
        "ASN" => "N",
        "ASP" => "D",
        "CYS" => "C",
        "GLN" => "Q",
        "GLU" => "E",
        "GLY" => "G",
        "HIS" => "H",
        "ILE" => "I",
        "LEU" => "L",
        "LYS" => "K",
        "MET" => "M",
        "PHE" => "F",
        "PRO" => "P",
        "SER" => "S",
        "THR" => "T",
        "TRP" => "W",
        "TYR" => "Y",
        "VAL" => "V",
        _ => "X",
    };

    match aa_code {
        "X" => None,
        _ => Some(aa_code),
    }
}
