use core::f64::consts::TAU;

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{ensure_finite, ensure_positive, ensure_samples},
    linspace, Color, GeometryError, Matrix3x2, Scene, DEFAULT_ORBIT_SAMPLES,
};

/// The drawing order given to orbit lines, so they stay visible over surfaces.
const ORBIT_Z_ORDER: i32 = 1;

/// The width of orbit lines, in screen points.
const ORBIT_LINE_WIDTH: f32 = 1.5;

/// The orbital elements describing an orbit to plot.
///
/// Angles are in degrees and distances are in kilometers.
///
/// # Eccentricity
/// The eccentricity is stored, but the plotted path does not depend on it:
/// the orbit is drawn as a circle with a radius of the semi-major axis,
/// tilted into the orbital plane. See [`OrbitEllipse`].
///
/// # Example
/// ```
/// use glam::DVec3;
/// use keplerian_plot::{Color, OrbitElements};
///
/// let elements = OrbitElements::new(
///     // Inclination
///     51.6,
///
///     // Right ascension of the ascending node
///     45.0,
///
///     // Argument of perigee
///     80.0,
///
///     // Semi-major axis
///     6_771.0,
///
///     // Eccentricity
///     0.0005,
/// )
/// .with_color(Color::rgb(1.0, 0.5, 0.0));
///
/// assert_eq!(elements.center, DVec3::ZERO);
/// assert_eq!(elements.samples, 100);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitElements {
    /// The inclination of the orbit, in degrees.
    ///
    /// The inclination is the angle between the plane of the orbit and the
    /// reference (XY) plane.
    pub inclination: f64,

    /// The right ascension of the ascending node, in degrees.
    ///
    /// This is the angle, in the reference plane, from the X axis to the
    /// point where the orbit crosses the reference plane going north.
    pub raan: f64,

    /// The argument of perigee, in degrees.
    ///
    /// This is the angle, in the orbital plane, from the ascending node to
    /// the perigee.
    pub arg_perigee: f64,

    /// The semi-major axis of the orbit, in kilometers.
    pub semi_major_axis: f64,

    /// The eccentricity of the orbit.
    ///
    /// Accepted for completeness; it does not change the plotted path.
    pub eccentricity: f64,

    /// The center of the orbit, in kilometers. Defaults to the origin.
    pub center: DVec3,

    /// How many points to sample along the orbit. Defaults to 100.
    pub samples: usize,

    /// The color of the line. Defaults to red.
    pub color: Color,
}

impl OrbitElements {
    /// Creates a set of orbital elements centered on the origin.
    ///
    /// Angles are in degrees and the semi-major axis is in kilometers.
    pub fn new(
        inclination: f64,
        raan: f64,
        arg_perigee: f64,
        semi_major_axis: f64,
        eccentricity: f64,
    ) -> Self {
        Self {
            inclination,
            raan,
            arg_perigee,
            semi_major_axis,
            eccentricity,
            center: DVec3::ZERO,
            samples: DEFAULT_ORBIT_SAMPLES,
            color: Color::RED,
        }
    }

    /// Sets the center, in kilometers.
    pub fn with_center(mut self, center: DVec3) -> Self {
        self.center = center;
        self
    }

    /// Sets how many points to sample along the orbit.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Sets the color of the line.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Converts the elements into an orbit ready for sampling.
    pub fn to_ellipse(&self) -> OrbitEllipse {
        OrbitEllipse {
            inclination: self.inclination.to_radians(),
            raan: self.raan.to_radians(),
            arg_perigee: self.arg_perigee.to_radians(),
            semi_major_axis: self.semi_major_axis,
            eccentricity: self.eccentricity,
            center: self.center,
        }
    }

    fn validate(&self) -> Result<(), GeometryError> {
        validate_orbit(
            [self.inclination, self.raan, self.arg_perigee],
            self.semi_major_axis,
            self.center,
            self.samples,
        )
    }
}

impl Default for OrbitElements {
    /// A circular, equatorial orbit 10 000 km from the origin.
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 10_000.0, 0.0)
    }
}

/// An orbit, with its angles in radians, ready to be sampled.
///
/// The path is a circle with a radius of the semi-major axis. It is
/// parameterized by an angle `u`, measured in the orbital plane from the
/// perigee, and tilted into 3D:
///
/// ```text
/// x = cx + a (cos(u + ω) cos(Ω) - sin(u + ω) sin(Ω) cos(i))
/// y = cy + a (cos(u + ω) sin(Ω) + sin(u + ω) cos(Ω) cos(i))
/// z = cz + a  sin(u + ω) sin(i)
/// ```
///
/// where `a` is the semi-major axis, `i` the inclination, `Ω` the RAAN and
/// `ω` the argument of perigee.
///
/// The eccentricity is carried along but does not enter the formula.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitEllipse {
    /// The inclination of the orbit, in radians.
    pub inclination: f64,

    /// The right ascension of the ascending node, in radians.
    pub raan: f64,

    /// The argument of perigee, in radians.
    pub arg_perigee: f64,

    /// The semi-major axis of the orbit, in kilometers.
    pub semi_major_axis: f64,

    /// The eccentricity of the orbit. Not used by the path.
    pub eccentricity: f64,

    /// The center of the orbit, in kilometers.
    pub center: DVec3,
}

impl OrbitEllipse {
    /// Gets the matrix that tilts the perifocal plane into 3D.
    ///
    /// The first column is where the perigee direction ends up, and the
    /// second column is 90 degrees further along the orbit.
    pub fn transformation_matrix(&self) -> Matrix3x2 {
        let mut matrix = Matrix3x2::default();

        let (sin_inc, cos_inc) = self.inclination.sin_cos();
        let (sin_arg_pe, cos_arg_pe) = self.arg_perigee.sin_cos();
        let (sin_raan, cos_raan) = self.raan.sin_cos();

        // https://downloads.rene-schwarz.com/download/M001-Keplerian_Orbit_Elements_to_Cartesian_State_Vectors.pdf
        matrix.e11 = cos_arg_pe * cos_raan - sin_arg_pe * cos_inc * sin_raan;
        matrix.e12 = -(sin_arg_pe * cos_raan + cos_arg_pe * cos_inc * sin_raan);

        matrix.e21 = cos_arg_pe * sin_raan + sin_arg_pe * cos_inc * cos_raan;
        matrix.e22 = cos_arg_pe * cos_inc * cos_raan - sin_arg_pe * sin_raan;

        matrix.e31 = sin_arg_pe * sin_inc;
        matrix.e32 = cos_arg_pe * sin_inc;

        matrix
    }

    /// Tilts a vector in the perifocal plane into 3D.
    ///
    /// The result is relative to the orbit's center; it is not offset by it.
    pub fn transform_plane_vector(&self, vector: DVec2) -> DVec3 {
        self.transformation_matrix().dot_vec(vector)
    }

    /// Gets the unit normal of the orbital plane.
    ///
    /// For a prograde equatorial orbit this is +Z.
    pub fn normal(&self) -> DVec3 {
        let matrix = self.transformation_matrix();
        matrix.p_axis().cross(matrix.q_axis()).normalize()
    }

    /// Gets the position at the angle `u` (in radians) from the perigee.
    pub fn position_at(&self, u: f64) -> DVec3 {
        let (sin_u, cos_u) = u.sin_cos();
        self.center + self.semi_major_axis * self.transform_plane_vector(DVec2::new(cos_u, sin_u))
    }

    /// Samples `samples` points evenly over `u` in `[0, 2π]`, without
    /// validating anything.
    ///
    /// Both ends are sampled, so the first and last point coincide.
    pub fn curve_unchecked(&self, samples: usize) -> Curve {
        let matrix = self.transformation_matrix();

        let points: Vec<DVec3> = linspace(0.0, TAU, samples)
            .map(|u| {
                let (sin_u, cos_u) = u.sin_cos();
                self.center + self.semi_major_axis * matrix.dot_vec(DVec2::new(cos_u, sin_u))
            })
            .collect();

        tracing::debug!(
            samples,
            semi_major_axis = self.semi_major_axis,
            "generated orbit curve"
        );

        Curve { points }
    }

    /// Samples `samples` points evenly over `u` in `[0, 2π]`.
    ///
    /// # Errors
    /// Returns [`GeometryError::InvalidParameter`] if the semi-major axis is
    /// not positive and finite, any angle or center coordinate is not
    /// finite, or fewer than two samples are asked for.
    pub fn curve(&self, samples: usize) -> Result<Curve, GeometryError> {
        validate_orbit(
            [self.inclination, self.raan, self.arg_perigee],
            self.semi_major_axis,
            self.center,
            samples,
        )?;
        Ok(self.curve_unchecked(samples))
    }
}

/// Checks the elements shared by [`OrbitElements`] and [`OrbitEllipse`].
///
/// `angles` are the inclination, RAAN and argument of perigee, in either unit.
fn validate_orbit(
    angles: [f64; 3],
    semi_major_axis: f64,
    center: DVec3,
    samples: usize,
) -> Result<(), GeometryError> {
    let [inclination, raan, arg_perigee] = angles;
    ensure_finite("inclination", inclination)?;
    ensure_finite("raan", raan)?;
    ensure_finite("arg_perigee", arg_perigee)?;
    ensure_positive("semi_major_axis", semi_major_axis)?;
    ensure_finite("center.x", center.x)?;
    ensure_finite("center.y", center.y)?;
    ensure_finite("center.z", center.z)?;
    ensure_samples("samples", samples)
}

impl From<&OrbitElements> for OrbitEllipse {
    fn from(elements: &OrbitElements) -> Self {
        elements.to_ellipse()
    }
}

/// An ordered sequence of points forming a closed path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Curve {
    points: Vec<DVec3>,
}

impl Curve {
    /// Creates a curve from its points.
    pub fn new(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    /// The points of the curve, in order.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// The number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the straight segments between consecutive points.
    pub fn segments(&self) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Appends an orbit to a scene, drawn as a line over the scene's surfaces.
///
/// Returns the sampled curve.
///
/// # Errors
/// See [`OrbitEllipse::curve`].
///
/// # Example
/// ```
/// use keplerian_plot::{create_sphere, plot_orbit_ellipse, OrbitElements, SphereConfig};
///
/// let (mut scene, _) = create_sphere(&SphereConfig::default()).unwrap();
///
/// // A polar orbit
/// let orbit = OrbitElements::new(90.0, 0.0, 0.0, 8000.0, 0.0);
/// let curve = plot_orbit_ellipse(&mut scene, &orbit).unwrap();
///
/// let highest = curve.points().iter().map(|p| p.z).fold(f64::MIN, f64::max);
/// assert!((highest - 8000.0).abs() < 5.0);
/// ```
pub fn plot_orbit_ellipse(
    scene: &mut Scene,
    elements: &OrbitElements,
) -> Result<Curve, GeometryError> {
    elements.validate()?;

    if elements.eccentricity != 0.0 {
        tracing::debug!(
            eccentricity = elements.eccentricity,
            "eccentricity does not change the plotted orbit path"
        );
    }

    let curve = elements.to_ellipse().curve_unchecked(elements.samples);

    scene.push_line(curve.clone(), elements.color, ORBIT_Z_ORDER, ORBIT_LINE_WIDTH);

    Ok(curve)
}
