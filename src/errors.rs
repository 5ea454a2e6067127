//! Error taxonomy for the distance-matrix core.

use thiserror::Error;

/// Failures that can arise while computing inter-residue distances.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DistanceError {
    /// The metric selector is not one of the supported distance measures.
    #[error("Unsupported distance metric: {0}")]
    UnsupportedMetric(String),

    /// The requested atom is absent from the residue and no virtual
    /// reconstruction rule exists for it. Aborts the whole matrix build.
    #[error("Residue {resn} {resi} has no {atom} atom and no reconstruction rule exists for it")]
    UnsupportedAtom {
        /// Name of the missing atom
        atom: String,
        /// Three-letter name of the offending residue
        resn: String,
        /// Sequence number of the offending residue
        resi: isize,
    },

    /// A centroid was requested for a residue with no matching atoms
    /// (e.g. glycine under a sidechain-only selection). Recovered internally
    /// by the matrix builder's fill policy and never surfaced to callers.
    #[error("Centroid is undefined for a residue with no matching atoms")]
    UndefinedCentroid,
}
