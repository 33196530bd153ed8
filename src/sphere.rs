use core::f64::consts::{PI, TAU};

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{ensure_finite, ensure_positive, ensure_samples},
    linspace, AxisLabels, Color, GeometryError, Scene, DEFAULT_AZIMUTH_SAMPLES,
    DEFAULT_POLAR_SAMPLES, EARTH_RADIUS_KM,
};

/// The settings for a sphere.
///
/// # Example
/// ```
/// use glam::DVec3;
/// use keplerian_plot::SphereConfig;
///
/// let config = SphereConfig::default();
///
/// assert_eq!(config.radius, 6371.0);
/// assert_eq!(config.center, DVec3::ZERO);
/// assert_eq!(config.transparency, 0.5);
///
/// let moon = SphereConfig::default()
///     .with_radius(1737.4)
///     .with_center(DVec3::new(384_400.0, 0.0, 0.0));
/// assert_eq!(moon.radius, 1737.4);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphereConfig {
    /// The radius of the sphere, in kilometers.
    ///
    /// Defaults to the mean radius of the Earth, 6371 km.
    pub radius: f64,

    /// The center of the sphere, in kilometers.
    ///
    /// Defaults to the origin.
    pub center: DVec3,

    /// The opacity of the sphere's surface.
    ///
    /// 0 is fully transparent and 1 is opaque. Defaults to 0.5.
    ///
    /// Values outside of that range are not rejected; they're clamped when
    /// drawn.
    pub transparency: f64,

    /// How many azimuth angles to sample in `[0, 2π]`. Defaults to 100.
    pub azimuth_samples: usize,

    /// How many polar angles to sample in `[0, π]`. Defaults to 50.
    pub polar_samples: usize,

    /// The color of the surface. Defaults to blue.
    pub color: Color,
}

impl SphereConfig {
    /// The settings for the Earth, which are also the defaults.
    pub fn earth() -> Self {
        Self::default()
    }

    /// Sets the radius, in kilometers.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the center, in kilometers.
    pub fn with_center(mut self, center: DVec3) -> Self {
        self.center = center;
        self
    }

    /// Sets the opacity of the surface.
    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }

    /// Sets the sampling resolution of the mesh.
    pub fn with_resolution(mut self, azimuth_samples: usize, polar_samples: usize) -> Self {
        self.azimuth_samples = azimuth_samples;
        self.polar_samples = polar_samples;
        self
    }

    /// Sets the color of the surface.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    fn validate(&self) -> Result<(), GeometryError> {
        ensure_positive("radius", self.radius)?;
        ensure_finite("center.x", self.center.x)?;
        ensure_finite("center.y", self.center.y)?;
        ensure_finite("center.z", self.center.z)?;
        ensure_samples("azimuth_samples", self.azimuth_samples)?;
        ensure_samples("polar_samples", self.polar_samples)?;
        Ok(())
    }
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: EARTH_RADIUS_KM,
            center: DVec3::ZERO,
            transparency: 0.5,
            azimuth_samples: DEFAULT_AZIMUTH_SAMPLES,
            polar_samples: DEFAULT_POLAR_SAMPLES,
            color: Color::BLUE,
        }
    }
}

/// A grid of points making up a surface.
///
/// Points are stored row by row. For a sphere, each row is one polar angle
/// and each column is one azimuth angle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    points: Vec<DVec3>,
    rows: usize,
    cols: usize,
}

impl Mesh {
    /// Creates a mesh from row-major points.
    ///
    /// Returns `None` if `points` doesn't hold exactly `rows * cols` points.
    pub fn from_rows(points: Vec<DVec3>, rows: usize, cols: usize) -> Option<Self> {
        if rows.checked_mul(cols)? != points.len() {
            return None;
        }
        Some(Self { points, rows, cols })
    }

    /// The number of rows in the grid.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns in the grid.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The total number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the mesh has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points, row by row.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// The point at the given row and column, if it exists.
    pub fn point(&self, row: usize, col: usize) -> Option<DVec3> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.points.get(row * self.cols + col).copied()
    }

    /// One row of the grid.
    pub fn row(&self, row: usize) -> Option<&[DVec3]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.points.get(start..start + self.cols)
    }

    /// Iterates over every grid cell as four corners.
    ///
    /// The corners go around the cell: `(r, c)`, `(r, c + 1)`,
    /// `(r + 1, c + 1)`, `(r + 1, c)`.
    pub fn quads(&self) -> impl Iterator<Item = [DVec3; 4]> + '_ {
        let rows = self.rows.saturating_sub(1);
        let cols = self.cols.saturating_sub(1);
        let stride = self.cols;

        (0..rows).flat_map(move |r| {
            (0..cols).map(move |c| {
                let i = r * stride + c;
                [
                    self.points[i],
                    self.points[i + 1],
                    self.points[i + stride + 1],
                    self.points[i + stride],
                ]
            })
        })
    }
}

/// Generates the points of a sphere, after validating the config.
///
/// See [`sphere_mesh_unchecked`] for the sampling.
///
/// # Errors
/// Returns [`GeometryError::InvalidParameter`] if the radius is not
/// positive and finite, the center is not finite, or either resolution is
/// below two samples.
pub fn sphere_mesh(config: &SphereConfig) -> Result<Mesh, GeometryError> {
    config.validate()?;
    Ok(sphere_mesh_unchecked(config))
}

/// Generates the points of a sphere without validating the config.
///
/// The azimuth `u` is sampled evenly over `[0, 2π]` and the polar angle `v`
/// evenly over `[0, π]`, both endpoints included. Each pair maps to:
///
/// ```text
/// x = cx + r sin(v) cos(u)
/// y = cy + r sin(v) sin(u)
/// z = cz + r cos(v)
/// ```
///
/// Since both `u = 0` and `u = 2π` are sampled, the first and last column
/// coincide. That seam closes the surface when drawn.
///
/// A negative radius yields a mirrored sphere and a zero radius collapses
/// every point onto the center.
pub fn sphere_mesh_unchecked(config: &SphereConfig) -> Mesh {
    let rows = config.polar_samples;
    let cols = config.azimuth_samples;

    let azimuths: Vec<(f64, f64)> = linspace(0.0, TAU, cols).map(f64::sin_cos).collect();

    let mut points = Vec::with_capacity(rows * cols);

    for v in linspace(0.0, PI, rows) {
        let (sin_v, cos_v) = v.sin_cos();

        points.extend(azimuths.iter().map(|&(sin_u, cos_u)| {
            config.center
                + config.radius * DVec3::new(sin_v * cos_u, sin_v * sin_u, cos_v)
        }));
    }

    tracing::debug!(rows, cols, radius = config.radius, "generated sphere mesh");

    Mesh { points, rows, cols }
}

/// Appends a sphere to an existing scene.
///
/// The sphere is drawn as a shaded surface with the config's color and
/// transparency. The axis labels are set to kilometers and the view
/// bounds are refitted to include the sphere.
///
/// Returns the generated mesh.
pub fn add_sphere(scene: &mut Scene, config: &SphereConfig) -> Result<Mesh, GeometryError> {
    let mesh = sphere_mesh(config)?;

    scene.push_surface(mesh.clone(), config.color, config.transparency);
    scene.set_labels(AxisLabels::kilometers());
    scene.set_autoscale(true);

    Ok(mesh)
}

/// Creates a new scene with a sphere in it.
///
/// This is the entry point of a plot: the returned scene is owned by the
/// caller, who can append more to it, e.g. with
/// [`plot_orbit_ellipse`][crate::plot_orbit_ellipse], and then show it.
///
/// # Example
/// ```
/// use keplerian_plot::{create_sphere, SphereConfig};
///
/// let (scene, mesh) = create_sphere(&SphereConfig::default()).unwrap();
///
/// assert_eq!(mesh.rows(), 50);
/// assert_eq!(mesh.cols(), 100);
/// assert_eq!(scene.labels().x, "X (km)");
///
/// let bounds = scene.bounds().unwrap();
/// assert!((bounds.max.z - 6371.0).abs() < 1e-9);
/// ```
pub fn create_sphere(config: &SphereConfig) -> Result<(Scene, Mesh), GeometryError> {
    let mut scene = Scene::new();
    let mesh = add_sphere(&mut scene, config)?;
    Ok((scene, mesh))
}
