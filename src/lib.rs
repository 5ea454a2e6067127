#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # Conmat Library
//!
//! This library computes inter-residue distance and contact matrices for
//! protein structures read from PDB and mmCIF files. Five pairwise distance
//! measures are supported: CA-CA, CB-CB (with virtual CB reconstruction for
//! glycine), center of mass, side-chain center of mass, and minimum van der
//! Waals surface distance.
//!
//! The matrix builder fills the strict upper triangle of an `n x n`
//! `nalgebra` matrix, one cell per unique residue pair; mirroring, contact
//! thresholding and tabular export are separate presentation helpers.

mod atoms;
mod errors;
mod geometry;
mod matrix;
mod metrics;
mod residues;
mod utils;

// Re-export key public types
pub use atoms::{atomic_mass, vdw_radius, Atom};
pub use errors::DistanceError;
pub use geometry::rotate_about_axis;
pub use matrix::{build_distance_matrix, contact_map, mirror_upper};
pub use metrics::{
    atom_distance, cmass_distance, min_vdw_distance, residue_distance, DistanceMetric,
};
pub use residues::{three_to_one, Residue};
pub use utils::{
    collect_residues, load_model, mat_to_plaintext, matrix_to_df, parse_chain_filter,
    run_with_threads, write_df_to_file, DataFrameFileType,
};

use nalgebra as na;
use pdbtbx::PDB;
use tracing::debug;

/// Calculate the inter-residue distance matrix for a PDB structure.
///
/// # Arguments
///
/// * `pdb` - Reference to a PDB structure
/// * `chains` - Comma-separated chain IDs to include ("" for all chains)
/// * `metric` - The inter-residue distance measure
///
/// # Returns
///
/// An `n x n` matrix over the residues of the selected chains (in file
/// order) with the pairwise distances in its upper triangle. See
/// [`build_distance_matrix`] for the triangle and fill conventions.
///
/// # Errors
///
/// Fails with [`DistanceError::UnsupportedAtom`] when a residue is missing
/// an atom the metric needs and no reconstruction rule exists for it.
///
/// # Example
///
/// ```no_run
/// use conmat::{get_distance_matrix, load_model, DistanceMetric};
///
/// let input_file = "path/to/structure.pdb".to_string();
/// let (pdb, _errors) = load_model(&input_file).unwrap();
/// let mat = get_distance_matrix(&pdb, "", DistanceMetric::Ca).unwrap();
/// println!("Computed {} x {} distances", mat.nrows(), mat.ncols());
/// ```
pub fn get_distance_matrix(
    pdb: &PDB,
    chains: &str,
    metric: DistanceMetric,
) -> Result<na::DMatrix<f64>, DistanceError> {
    let residues = collect_residues(pdb, chains);
    debug!(
        "Collected {} residues for the {metric} distance matrix",
        residues.len()
    );

    build_distance_matrix(&residues, metric)
}
