//! Assembly of the inter-residue distance matrix.

use crate::errors::DistanceError;
use crate::metrics::{residue_distance, DistanceMetric};
use crate::residues::Residue;
use nalgebra as na;
use rayon::prelude::*;
use tracing::debug;

/// Build the upper-triangular distance matrix for an ordered residue list.
///
/// Entry `[i][j]` with `i < j` holds the distance between residues `i` and
/// `j` under `metric`; the diagonal and lower triangle are left at zero.
/// Matrix index `i` corresponds to position `i` in `residues`, which is
/// never reordered.
///
/// Pairs whose side-chain centroid is undefined (glycine under `sccmass`)
/// are deferred and filled with the maximum value present in the matrix once
/// all other pairs are computed, so no NaNs reach the caller. A missing atom
/// without a reconstruction rule aborts the whole build with
/// [`DistanceError::UnsupportedAtom`].
///
/// The pair loop runs on the rayon thread pool; results are written back in
/// lexicographic pair order, so the output is deterministic regardless of
/// thread count.
pub fn build_distance_matrix(
    residues: &[Residue],
    metric: DistanceMetric,
) -> Result<na::DMatrix<f64>, DistanceError> {
    let n = residues.len();
    let mut mat = na::DMatrix::<f64>::zeros(n, n);

    // All unique unordered pairs (i, j) with i < j, in lexicographic order
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let cells = pairs
        .into_par_iter()
        .map(
            |(i, j)| match residue_distance(&residues[i], &residues[j], metric) {
                Ok(dist) => Ok(((i, j), Some(dist))),
                Err(DistanceError::UndefinedCentroid) => Ok(((i, j), None)),
                Err(e) => Err(e),
            },
        )
        .collect::<Result<Vec<_>, DistanceError>>()?;

    let mut deferred = Vec::new();
    for ((i, j), dist) in cells {
        match dist {
            Some(dist) => mat[(i, j)] = dist,
            None => deferred.push((i, j)),
        }
    }

    // Cells with an undefined centroid get the largest distance seen anywhere
    // in the matrix, so they render as "far apart" instead of poisoning the
    // map with NaNs.
    if !deferred.is_empty() {
        let fill = mat.max();
        debug!(
            "Filling {} undefined centroid pair(s) with the matrix maximum {fill:.3}",
            deferred.len()
        );
        for (i, j) in deferred {
            mat[(i, j)] = fill;
        }
    }

    Ok(mat)
}

/// Reflect the upper triangle into the lower one, producing the full
/// symmetric matrix. Presentation helper; the core builder only fills the
/// upper triangle.
pub fn mirror_upper(mat: &na::DMatrix<f64>) -> na::DMatrix<f64> {
    let mut full = mat.clone();
    for i in 0..mat.nrows() {
        for j in (i + 1)..mat.ncols() {
            full[(j, i)] = full[(i, j)];
        }
    }
    full
}

/// Threshold a distance matrix into a binary contact matrix: 1.0 where the
/// distance is below `threshold`, 0.0 elsewhere.
pub fn contact_map(mat: &na::DMatrix<f64>, threshold: f64) -> na::DMatrix<f64> {
    mat.map(|dist| if dist < threshold { 1.0 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::Atom;

    const TOL: f64 = 1e-9;

    /// A minimal residue with a full backbone and optionally a CB, with the
    /// CA placed at the given coordinates.
    fn residue(resn: &str, resi: isize, ca: (f64, f64, f64), with_cb: bool) -> Residue {
        let (x, y, z) = ca;
        let mut atoms = vec![
            Atom::new("N", na::Vector3::new(x, y + 1.5, z)),
            Atom::new("CA", na::Vector3::new(x, y, z)),
            Atom::new("C", na::Vector3::new(x + 1.5, y, z)),
            Atom::new("O", na::Vector3::new(x + 2.2, y + 1.0, z)),
        ];
        if with_cb {
            atoms.push(Atom::new("CB", na::Vector3::new(x, y - 1.5, z)));
        }
        Residue::new(resn, resi, atoms)
    }

    fn chain() -> Vec<Residue> {
        vec![
            residue("ALA", 1, (0.0, 0.0, 0.0), true),
            residue("GLY", 2, (3.0, 4.0, 0.0), false),
            residue("SER", 3, (8.0, 4.0, 0.0), true),
            residue("VAL", 4, (12.0, 1.0, 0.0), true),
        ]
    }

    #[test]
    fn shape_diagonal_and_lower_triangle() {
        let residues = chain();
        let mat = build_distance_matrix(&residues, DistanceMetric::Ca).unwrap();

        assert_eq!(mat.nrows(), 4);
        assert_eq!(mat.ncols(), 4);
        for i in 0..4 {
            assert_eq!(mat[(i, i)], 0.0);
            for j in 0..i {
                assert_eq!(mat[(i, j)], 0.0, "lower triangle must stay zero");
            }
        }
    }

    #[test]
    fn ca_distances_in_upper_triangle() {
        let residues = chain();
        let mat = build_distance_matrix(&residues, DistanceMetric::Ca).unwrap();

        // CA atoms at (0,0,0) and (3,4,0) are exactly 5 apart
        assert!((mat[(0, 1)] - 5.0).abs() < TOL);
        assert!((mat[(1, 2)] - 5.0).abs() < TOL);
        assert!((mat[(2, 3)] - 5.0).abs() < TOL);
    }

    #[test]
    fn distances_are_non_negative() {
        let residues = chain();
        for metric in [
            DistanceMetric::Ca,
            DistanceMetric::Cb,
            DistanceMetric::Cmass,
            DistanceMetric::ScCmass,
        ] {
            let mat = build_distance_matrix(&residues, metric).unwrap();
            assert!(
                mat.iter().all(|&d| d >= 0.0),
                "negative entry under {metric}"
            );
        }
    }

    #[test]
    fn cb_metric_handles_glycine_via_virtual_atom() {
        let residues = chain();
        let mat = build_distance_matrix(&residues, DistanceMetric::Cb).unwrap();

        // Every pair involving the glycine still gets a distance
        assert!(mat[(0, 1)] > 0.0);
        assert!(mat[(1, 2)] > 0.0);
    }

    #[test]
    fn sccmass_fill_uses_matrix_maximum() {
        // Glycine in the middle has no side chain, so pairs (0,1) and (1,2)
        // have undefined centroids and get the matrix maximum, which is the
        // only computed cell (0,2).
        let residues = vec![
            residue("ALA", 1, (0.0, 0.0, 0.0), true),
            residue("GLY", 2, (5.0, 0.0, 0.0), false),
            residue("SER", 3, (10.0, 0.0, 0.0), true),
        ];
        let mat = build_distance_matrix(&residues, DistanceMetric::ScCmass).unwrap();

        let max = mat[(0, 2)];
        assert!(max > 0.0);
        assert_eq!(mat[(0, 1)], max);
        assert_eq!(mat[(1, 2)], max);
    }

    #[test]
    fn missing_atom_aborts_the_build() {
        // A residue with no CA cannot be measured under the CA metric
        let broken = Residue::new(
            "ALA",
            2,
            vec![Atom::new("CB", na::Vector3::new(1.0, 1.0, 1.0))],
        );
        let residues = vec![residue("ALA", 1, (0.0, 0.0, 0.0), true), broken];

        let err = build_distance_matrix(&residues, DistanceMetric::Ca).unwrap_err();
        assert!(matches!(err, DistanceError::UnsupportedAtom { .. }));
    }

    #[test]
    fn builds_are_idempotent() {
        let residues = chain();
        for metric in [
            DistanceMetric::Ca,
            DistanceMetric::Cb,
            DistanceMetric::Cmass,
            DistanceMetric::ScCmass,
            DistanceMetric::MinVdw,
        ] {
            let first = build_distance_matrix(&residues, metric).unwrap();
            let second = build_distance_matrix(&residues, metric).unwrap();
            assert_eq!(first, second, "non-deterministic build under {metric}");
        }
    }

    #[test]
    fn empty_and_single_residue_lists() {
        let mat = build_distance_matrix(&[], DistanceMetric::Ca).unwrap();
        assert_eq!(mat.nrows(), 0);

        let mat =
            build_distance_matrix(&chain()[..1], DistanceMetric::Ca).unwrap();
        assert_eq!(mat.nrows(), 1);
        assert_eq!(mat[(0, 0)], 0.0);
    }

    #[test]
    fn mirroring_produces_a_symmetric_matrix() {
        let residues = chain();
        let mat = build_distance_matrix(&residues, DistanceMetric::Ca).unwrap();
        let full = mirror_upper(&mat);

        for i in 0..full.nrows() {
            for j in 0..full.ncols() {
                assert_eq!(full[(i, j)], full[(j, i)]);
            }
        }
        assert_eq!(full[(1, 0)], mat[(0, 1)]);
    }

    #[test]
    fn contact_map_thresholds_distances() {
        let residues = chain();
        let mat = mirror_upper(&build_distance_matrix(&residues, DistanceMetric::Ca).unwrap());
        let contacts = contact_map(&mat, 8.0);

        assert_eq!(contacts[(0, 1)], 1.0); // 5.0 < 8.0
        assert_eq!(contacts[(0, 3)], 0.0); // > 8.0
        assert_eq!(contacts[(0, 0)], 1.0); // self-distance 0 is a contact
    }
}
