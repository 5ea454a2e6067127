//! 3D rotation helper used by virtual-atom reconstruction.

use nalgebra as na;

/// Rotate `v` by `angle` radians about `axis`.
///
/// The axis does not need to be a unit vector; it is normalized internally.
/// A zero-length axis is a degenerate input and yields a meaningless result
/// (the caller guarantees well-formed geometry).
pub fn rotate_about_axis(
    v: &na::Vector3<f64>,
    axis: &na::Vector3<f64>,
    angle: f64,
) -> na::Vector3<f64> {
    let rotation = na::Rotation3::from_axis_angle(&na::Unit::new_normalize(*axis), angle);
    rotation * v
}
