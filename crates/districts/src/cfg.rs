//! Tolerance defaults and the fixed frame (internal).
//!
//! Policy
//! - Defaults are fixed constants to avoid "tolerance juggling" at call sites.
//!   Positions are world coordinates; the ground plane is XY and `UP` is +Z.

use nalgebra::Vector3;

/// Global up axis used for side-of-road and turn-direction tests.
pub const UP: Vector3<f64> = Vector3::new(0.0, 0.0, 1.0);

/// Roads shorter than this are rejected at build time.
pub(crate) const LENGTH_EPS: f64 = 1e-9;
