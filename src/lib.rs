//! # Keplerian Orbit Plots
//! This library crate builds the geometry for a classic orbital-mechanics
//! figure: a shaded sphere standing in for a celestial body, with the path
//! of a Keplerian orbit drawn around it.
//!
//! The geometry is plain closed-form math. A sphere is sampled over an
//! azimuth/polar grid and converted from spherical to Cartesian coordinates.
//! An orbit is a circle in its perifocal plane, tilted into 3D using the
//! inclination, the right ascension of the ascending node (RAAN), and the
//! argument of perigee.
//!
//! ## Getting started
//! This crate provides a few main pieces:
//! - [`Scene`]: The drawing surface. It holds every drawable primitive
//!   appended to it, the axis labels, and the auto-fitted view bounds.
//!   Geometry functions only ever append to a scene.
//! - [`create_sphere`] / [`SphereConfig`]: Creates a scene with a sphere in
//!   it. The default config is the Earth, 6371 km in radius, half transparent.
//! - [`plot_orbit_ellipse`] / [`OrbitElements`]: Appends an orbit to an
//!   existing scene.
//! - [`Renderer`]: The seam to a display backend. With the `viewer` feature
//!   enabled, the `viewer` module shows a scene in a native window.
//!
//! ## Example
//!
//! ```rust
//! use keplerian_plot::{create_sphere, plot_orbit_ellipse, OrbitElements, SphereConfig};
//!
//! # fn main() -> Result<(), keplerian_plot::GeometryError> {
//! let (mut scene, mesh) = create_sphere(&SphereConfig::earth().with_transparency(1.0))?;
//! assert_eq!(mesh.len(), 100 * 50);
//!
//! let orbit = OrbitElements::new(0.0, 45.0, 80.0, 10_000.0, 0.99);
//! let curve = plot_orbit_ellipse(&mut scene, &orbit)?;
//!
//! assert_eq!(curve.len(), 100);
//! assert!((curve.points()[0].length() - 10_000.0).abs() < 1e-6);
//! assert_eq!(scene.primitives().len(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod orbit;
pub mod projection;
pub mod render;
mod scene;
mod sphere;
#[cfg(feature = "viewer")]
pub mod viewer;

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use error::{GeometryError, RenderError};
pub use orbit::{plot_orbit_ellipse, Curve, OrbitElements, OrbitEllipse};
pub use render::{RecordingRenderer, Renderer};
pub use scene::{AxisLabels, Bounds, Color, Primitive, Scene};
pub use sphere::{
    add_sphere, create_sphere, sphere_mesh, sphere_mesh_unchecked, Mesh, SphereConfig,
};

/// Mean radius of the Earth, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// The number of azimuth samples used for a sphere by default.
pub const DEFAULT_AZIMUTH_SAMPLES: usize = 100;

/// The number of polar samples used for a sphere by default.
pub const DEFAULT_POLAR_SAMPLES: usize = 50;

/// The number of samples taken along an orbit by default.
pub const DEFAULT_ORBIT_SAMPLES: usize = 100;

/// A struct representing a 3x2 matrix.
///
/// This struct is used to store the transformation matrix
/// for transforming a 2D vector into a 3D vector.
///
/// Namely, it is used in [`OrbitEllipse::transform_plane_vector`] to tilt
/// a point in the perifocal plane into 3D, using the orbital elements.
///
/// Each element is named `eXY`, where `X` is the row and `Y` is the column.
///
/// # Example
/// ```
/// use glam::{DVec2, DVec3};
///
/// use keplerian_plot::Matrix3x2;
///
/// let matrix = Matrix3x2 {
///    e11: 1.0, e12: 0.0,
///    e21: 0.0, e22: 1.0,
///    e31: 0.0, e32: 0.0,
/// };
///
/// let vec = DVec2::new(1.0, 2.0);
///
/// let result = matrix.dot_vec(vec);
///
/// assert_eq!(result, DVec3::new(1.0, 2.0, 0.0));
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix3x2 {
    // Element XY
    pub e11: f64,
    pub e12: f64,
    pub e21: f64,
    pub e22: f64,
    pub e31: f64,
    pub e32: f64,
}

impl Matrix3x2 {
    /// The matrix that embeds the 2D plane as the XY plane of 3D space.
    pub const IDENTITY: Self = Self {
        e11: 1.0,
        e12: 0.0,
        e21: 0.0,
        e22: 1.0,
        e31: 0.0,
        e32: 0.0,
    };

    /// Computes a dot product between this matrix and a 2D vector.
    ///
    /// # Example
    /// ```
    /// use glam::{DVec2, DVec3};
    ///
    /// use keplerian_plot::Matrix3x2;
    ///
    /// let matrix = Matrix3x2 {
    ///     e11: 1.0, e12: 0.0,
    ///     e21: 0.0, e22: 1.0,
    ///     e31: 1.0, e32: 1.0,
    /// };
    ///
    /// let vec = DVec2::new(1.0, 2.0);
    ///
    /// let result = matrix.dot_vec(vec);
    ///
    /// assert_eq!(result, DVec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn dot_vec(&self, vec: DVec2) -> DVec3 {
        DVec3::new(
            vec.x * self.e11 + vec.y * self.e12,
            vec.x * self.e21 + vec.y * self.e22,
            vec.x * self.e31 + vec.y * self.e32,
        )
    }

    /// The first column of the matrix, i.e. where the plane's X axis ends up.
    pub fn p_axis(&self) -> DVec3 {
        DVec3::new(self.e11, self.e21, self.e31)
    }

    /// The second column of the matrix, i.e. where the plane's Y axis ends up.
    pub fn q_axis(&self) -> DVec3 {
        DVec3::new(self.e12, self.e22, self.e32)
    }
}

/// Returns `count` evenly spaced values over the closed interval `[start, end]`.
///
/// The first value is exactly `start` and the last is exactly `end`.
/// A count of 1 yields just `start`; a count of 0 yields nothing.
///
/// # Example
/// ```
/// use keplerian_plot::linspace;
///
/// let values: Vec<f64> = linspace(0.0, 1.0, 5).collect();
/// assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> + Clone {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };

    (0..count).map(move |i| {
        if i + 1 == count && count > 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}
