use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Curve, Mesh};

/// An RGB color, each channel in the range 0 to 1.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Color {
    /// Pure blue, the default color of a sphere.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    /// Pure red, the default color of an orbit.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    /// Black, the color of axis labels.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Creates a color from its three channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Multiplies every channel by `factor`, clamping the result to 0..=1.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
        }
    }

    /// Converts the color to 8-bit channels.
    pub fn to_rgb8(self) -> [u8; 3] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLUE
    }
}

/// Labels of the three scene axes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisLabels {
    /// The label of the X axis.
    pub x: String,
    /// The label of the Y axis.
    pub y: String,
    /// The label of the Z axis.
    pub z: String,
}

impl AxisLabels {
    /// Labels for coordinates in kilometers.
    pub fn kilometers() -> Self {
        Self {
            x: "X (km)".to_string(),
            y: "Y (km)".to_string(),
            z: "Z (km)".to_string(),
        }
    }
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            x: "X".to_string(),
            y: "Y".to_string(),
            z: "Z".to_string(),
        }
    }
}

/// An axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    /// The corner with the smallest coordinates.
    pub min: DVec3,
    /// The corner with the largest coordinates.
    pub max: DVec3,
}

impl Bounds {
    /// Creates a box containing just one point.
    pub fn from_point(point: DVec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Creates the smallest box containing all `points`.
    ///
    /// Returns `None` if there are no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a DVec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(*iter.next()?);
        for point in iter {
            bounds.include(*point);
        }
        Some(bounds)
    }

    /// Grows the box to contain `point`.
    pub fn include(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grows the box to contain `other`.
    pub fn union(&mut self, other: &Bounds) {
        self.include(other.min);
        self.include(other.max);
    }

    /// The center of the box.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// The size of the box along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// The largest side length of the box.
    pub fn max_extent(&self) -> f64 {
        self.size().max_element()
    }

    /// A cube with the same center, with sides as long as the largest side
    /// of this box.
    ///
    /// Used to keep an equal aspect ratio on all three axes, so that spheres
    /// look like spheres.
    pub fn cubic(&self) -> Self {
        let half = DVec3::splat(self.max_extent() * 0.5);
        let center = self.center();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Checks whether `point` is inside the box, allowing `tolerance` of slack.
    pub fn contains(&self, point: DVec3, tolerance: f64) -> bool {
        let slack = DVec3::splat(tolerance);
        point.cmpge(self.min - slack).all() && point.cmple(self.max + slack).all()
    }
}

/// A drawable item in a [`Scene`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primitive {
    /// A mesh drawn as a shaded surface.
    Surface {
        /// The grid of points making up the surface.
        mesh: Mesh,
        /// The base color of the surface, before shading.
        color: Color,
        /// The opacity of the surface.
        ///
        /// 0 is fully transparent and 1 is opaque. Values outside that range
        /// are kept as given and clamped when drawn.
        alpha: f64,
    },
    /// A sequence of points drawn as a connected line.
    Line {
        /// The points the line passes through, in order.
        curve: Curve,
        /// The color of the line.
        color: Color,
        /// The drawing order of the line.
        ///
        /// Items with a higher `z_order` are drawn over items with a lower
        /// one, no matter their depth. Surfaces have a `z_order` of 0.
        z_order: i32,
        /// The width of the line, in screen points.
        width: f32,
    },
}

impl Primitive {
    /// The drawing order of the primitive.
    pub fn z_order(&self) -> i32 {
        match self {
            Primitive::Surface { .. } => 0,
            Primitive::Line { z_order, .. } => *z_order,
        }
    }

    /// The bounding box of the primitive's points.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Primitive::Surface { mesh, .. } => Bounds::from_points(mesh.points()),
            Primitive::Line { curve, .. } => Bounds::from_points(curve.points()),
        }
    }
}

/// A 3D drawing surface.
///
/// A scene collects primitives to draw, along with axis labels and the
/// bounds the view should show. Content is only ever appended: the geometry
/// functions in this crate take a `&mut Scene` and push onto it, but never
/// remove or replace what's already there.
///
/// # Example
/// ```
/// use keplerian_plot::{Scene, SphereConfig, add_sphere};
///
/// let mut scene = Scene::new();
/// assert!(scene.is_empty());
///
/// add_sphere(&mut scene, &SphereConfig::default()).unwrap();
/// assert_eq!(scene.primitives().len(), 1);
/// assert!(scene.bounds().is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scene {
    title: String,
    primitives: Vec<Primitive>,
    labels: AxisLabels,
    autoscale: bool,
    data_bounds: Option<Bounds>,
    fixed_bounds: Option<Bounds>,
}

impl Scene {
    /// Creates an empty scene with default labels and autoscaling turned on.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            primitives: Vec::new(),
            labels: AxisLabels::default(),
            autoscale: true,
            data_bounds: None,
            fixed_bounds: None,
        }
    }

    /// Creates an empty scene with the given window title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::new()
        }
    }

    /// The title of the scene.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Every primitive in the scene, in the order they were added.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Whether the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// The axis labels of the scene.
    pub fn labels(&self) -> &AxisLabels {
        &self.labels
    }

    /// Sets the axis labels of the scene.
    pub fn set_labels(&mut self, labels: AxisLabels) {
        self.labels = labels;
    }

    /// Whether the view bounds follow the data in the scene.
    pub fn autoscale(&self) -> bool {
        self.autoscale
    }

    /// Turns autoscaling on or off.
    ///
    /// While autoscaling is on, [`bounds`][Self::bounds] is the bounding box
    /// of all primitives in the scene. Turning it off freezes the bounds as
    /// they are at that moment: primitives added afterwards no longer move
    /// them.
    pub fn set_autoscale(&mut self, enabled: bool) {
        if self.autoscale && !enabled {
            self.fixed_bounds = self.data_bounds;
        }
        self.autoscale = enabled;
    }

    /// Fixes the view bounds and turns autoscaling off.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.fixed_bounds = Some(bounds);
        self.autoscale = false;
    }

    /// The bounds the view should show.
    ///
    /// With autoscaling on, this is the bounding box of every primitive, or
    /// `None` for an empty scene. With it off, this is the bounds given to
    /// [`set_bounds`][Self::set_bounds], or the ones frozen when autoscaling
    /// was turned off.
    pub fn bounds(&self) -> Option<Bounds> {
        if self.autoscale {
            self.data_bounds
        } else {
            self.fixed_bounds
        }
    }

    /// Appends a primitive to the scene.
    pub fn push(&mut self, primitive: Primitive) {
        if let Some(bounds) = primitive.bounds() {
            match &mut self.data_bounds {
                Some(existing) => existing.union(&bounds),
                None => self.data_bounds = Some(bounds),
            }
        }

        self.primitives.push(primitive);
    }

    /// Appends a mesh drawn as a shaded surface.
    pub fn push_surface(&mut self, mesh: Mesh, color: Color, alpha: f64) {
        if !(0.0..=1.0).contains(&alpha) {
            tracing::warn!(alpha, "surface transparency outside 0..=1, it will be clamped when drawn");
        }
        self.push(Primitive::Surface { mesh, color, alpha });
    }

    /// Appends a curve drawn as a line.
    pub fn push_line(&mut self, curve: Curve, color: Color, z_order: i32, width: f32) {
        self.push(Primitive::Line {
            curve,
            color,
            z_order,
            width,
        });
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
