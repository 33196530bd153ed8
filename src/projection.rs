//! Projection of a [`Scene`] onto a 2D viewport.
//!
//! This is the part of rendering that doesn't depend on any windowing
//! library. A [`Camera`] looks at the scene from some elevation and azimuth,
//! a [`Projector`] maps world points to screen points with a depth, and a
//! [`DrawList`] turns every primitive into flat, shaded, depth-sorted items
//! that any 2D painter can draw back to front.

use glam::{DMat3, DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Bounds, Color, Primitive, Scene};

/// The brightness of a surface facing away from the light.
const AMBIENT: f32 = 0.35;

/// Projected quads smaller than this, in square screen points, are skipped.
const MIN_QUAD_AREA: f64 = 1e-9;

/// Elevation limit of the camera, in degrees.
const MAX_ELEVATION: f64 = 90.0;

/// Degrees of camera rotation per screen point dragged.
const DRAG_SENSITIVITY: f64 = 0.5;

/// A camera looking at the center of a scene.
///
/// The camera is placed on a sphere around the scene's center, at some
/// elevation above the XY plane and some azimuth around the Z axis. The
/// Z axis always points up on screen.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Camera {
    /// The angle above the XY plane, in degrees.
    pub elevation: f64,

    /// The angle around the Z axis, measured from the X axis, in degrees.
    pub azimuth: f64,

    /// Magnification. 1 fits the whole scene in the viewport.
    pub zoom: f64,
}

impl Default for Camera {
    /// 30 degrees up and -60 degrees around, the usual default view of a
    /// 3D plot.
    fn default() -> Self {
        Self {
            elevation: 30.0,
            azimuth: -60.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Creates a camera with the given elevation and azimuth, in degrees.
    pub fn new(elevation: f64, azimuth: f64) -> Self {
        Self {
            elevation: elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION),
            azimuth,
            zoom: 1.0,
        }
    }

    /// The unit vector pointing from the scene's center to the camera.
    pub fn eye_direction(&self) -> DVec3 {
        let (sin_el, cos_el) = self.elevation.to_radians().sin_cos();
        let (sin_az, cos_az) = self.azimuth.to_radians().sin_cos();
        DVec3::new(cos_el * cos_az, cos_el * sin_az, sin_el)
    }

    /// The rotation from world space into view space.
    ///
    /// In view space, X points right on screen, Y points up on screen and
    /// Z points towards the camera.
    pub fn rotation(&self) -> DMat3 {
        let (sin_az, cos_az) = self.azimuth.to_radians().sin_cos();
        let forward = self.eye_direction();
        let right = DVec3::new(-sin_az, cos_az, 0.0);
        let up = forward.cross(right);

        DMat3::from_cols(right, up, forward).transpose()
    }

    /// Rotates the camera by a drag of `dx`, `dy` screen points.
    pub fn orbit_by(&mut self, dx: f64, dy: f64) {
        self.azimuth = (self.azimuth - dx * DRAG_SENSITIVITY).rem_euclid(360.0);
        self.elevation =
            (self.elevation + dy * DRAG_SENSITIVITY).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Multiplies the zoom by `factor`, keeping it within sane limits.
    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom = (self.zoom * factor).clamp(0.1, 50.0);
        }
    }
}

/// A point projected onto the screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProjectedPoint {
    /// The screen position, in points, from the top-left of the viewport.
    pub screen: DVec2,

    /// How close the point is to the camera. Larger is closer.
    pub depth: f64,
}

/// An orthographic projection from world space to a viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projector {
    rotation: DMat3,
    center: DVec3,
    scale: f64,
    viewport: DVec2,
}

impl Projector {
    /// Creates a projection that fits `bounds` in a viewport of the given
    /// size, seen from `camera`.
    ///
    /// The bounds are made cubic first, so all three axes share one scale.
    /// The cube fits the viewport whichever way the camera is turned.
    pub fn new(camera: &Camera, bounds: &Bounds, viewport: DVec2) -> Self {
        let cube = bounds.cubic();
        let half_diagonal = cube.max_extent() * 3f64.sqrt() * 0.5;
        let half_viewport = viewport.min_element().max(0.0) * 0.5;

        let scale = if half_diagonal > 0.0 {
            half_viewport / half_diagonal * camera.zoom
        } else {
            camera.zoom
        };

        Self {
            rotation: camera.rotation(),
            center: cube.center(),
            scale,
            viewport,
        }
    }

    /// Screen points per world unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The size of the viewport, in points.
    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    /// Rotates a world-space vector into view space, without translating it.
    pub fn to_view(&self, vector: DVec3) -> DVec3 {
        self.rotation * vector
    }

    /// Projects a world-space point.
    pub fn project(&self, point: DVec3) -> ProjectedPoint {
        let view = self.to_view(point - self.center);
        let half = self.viewport * 0.5;

        ProjectedPoint {
            screen: DVec2::new(half.x + view.x * self.scale, half.y - view.y * self.scale),
            depth: view.z,
        }
    }
}

/// A flat item ready to be painted.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawItem {
    /// A filled quadrilateral.
    Quad {
        /// The corners, in order around the quad.
        corners: [DVec2; 4],
        /// The shaded fill color.
        color: Color,
        /// The opacity, within 0..=1.
        alpha: f32,
    },
    /// A connected line.
    Polyline {
        /// The points of the line, in order.
        points: Vec<DVec2>,
        /// The color of the line.
        color: Color,
        /// The width of the line, in points.
        width: f32,
    },
}

/// One labeled axis of the scene's bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisGuide {
    /// The label text.
    pub label: String,
    /// Where the axis starts on screen.
    pub from: DVec2,
    /// Where the axis ends on screen.
    pub to: DVec2,
}

#[derive(Debug)]
struct SortedItem {
    z_order: i32,
    depth: f64,
    item: DrawItem,
}

/// Every item of a scene, flattened and ordered for painting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    /// Items to paint, in order. Later items go over earlier ones.
    pub items: Vec<DrawItem>,

    /// The axes of the scene's bounding box, with their labels.
    pub axes: Vec<AxisGuide>,
}

impl DrawList {
    /// Flattens a scene as seen through `projector`.
    ///
    /// Items are sorted by their primitive's drawing order first, then from
    /// far to near. Surfaces are split into quads, each one shaded by how
    /// much it faces a light placed above and to the left of the camera.
    pub fn build(scene: &Scene, projector: &Projector) -> Self {
        let light = DVec3::new(-0.5, 0.6, 1.0).normalize();
        let mut sorted: Vec<SortedItem> = Vec::new();

        for primitive in scene.primitives() {
            let z_order = primitive.z_order();

            match primitive {
                Primitive::Surface { mesh, color, alpha } => {
                    let alpha = clamp_alpha(*alpha);
                    if alpha == 0.0 {
                        continue;
                    }

                    for quad in mesh.quads() {
                        let projected = quad.map(|corner| projector.project(corner));
                        let corners = projected.map(|p| p.screen);

                        if polygon_area(&corners) < MIN_QUAD_AREA {
                            continue;
                        }

                        let brightness = shade(projector, &quad, light);
                        let depth = projected.iter().map(|p| p.depth).sum::<f64>() / 4.0;

                        sorted.push(SortedItem {
                            z_order,
                            depth,
                            item: DrawItem::Quad {
                                corners,
                                color: color.scaled(brightness),
                                alpha,
                            },
                        });
                    }
                }
                Primitive::Line {
                    curve,
                    color,
                    width,
                    ..
                } => {
                    if curve.is_empty() {
                        continue;
                    }

                    let projected: Vec<ProjectedPoint> =
                        curve.points().iter().map(|&p| projector.project(p)).collect();
                    let depth =
                        projected.iter().map(|p| p.depth).sum::<f64>() / projected.len() as f64;

                    sorted.push(SortedItem {
                        z_order,
                        depth,
                        item: DrawItem::Polyline {
                            points: projected.iter().map(|p| p.screen).collect(),
                            color: *color,
                            width: *width,
                        },
                    });
                }
            }
        }

        sorted.sort_by(|a, b| {
            a.z_order
                .cmp(&b.z_order)
                .then_with(|| a.depth.total_cmp(&b.depth))
        });

        let axes = scene
            .bounds()
            .map(|bounds| axis_guides(scene, &bounds.cubic(), projector))
            .unwrap_or_default();

        Self {
            items: sorted.into_iter().map(|s| s.item).collect(),
            axes,
        }
    }

    /// The number of quads in the list.
    pub fn quad_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, DrawItem::Quad { .. }))
            .count()
    }

    /// The number of polylines in the list.
    pub fn polyline_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, DrawItem::Polyline { .. }))
            .count()
    }
}

fn clamp_alpha(alpha: f64) -> f32 {
    if alpha.is_nan() {
        1.0
    } else {
        alpha.clamp(0.0, 1.0) as f32
    }
}

/// Two-sided Lambert shading: the normal is flipped to face the camera.
fn shade(projector: &Projector, quad: &[DVec3; 4], light: DVec3) -> f32 {
    let diagonal_a = quad[2] - quad[0];
    let diagonal_b = quad[3] - quad[1];
    let normal = projector.to_view(diagonal_b.cross(diagonal_a));

    let length = normal.length();
    if length == 0.0 || !length.is_finite() {
        return 1.0;
    }

    let mut normal = normal / length;
    if normal.z < 0.0 {
        normal = -normal;
    }

    let diffuse = normal.dot(light).max(0.0) as f32;
    AMBIENT + (1.0 - AMBIENT) * diffuse
}

/// Shoelace formula.
fn polygon_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    let twice_area: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice_area.abs() * 0.5
}

fn axis_guides(scene: &Scene, cube: &Bounds, projector: &Projector) -> Vec<AxisGuide> {
    let labels = scene.labels();
    let origin = cube.min;
    let size = cube.size();

    [
        (&labels.x, DVec3::new(size.x, 0.0, 0.0)),
        (&labels.y, DVec3::new(0.0, size.y, 0.0)),
        (&labels.z, DVec3::new(0.0, 0.0, size.z)),
    ]
    .into_iter()
    .map(|(label, offset)| AxisGuide {
        label: label.clone(),
        from: projector.project(origin).screen,
        to: projector.project(origin + offset).screen,
    })
    .collect()
}
