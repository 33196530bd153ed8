//! The seam between scenes and whatever displays them.

use glam::DVec2;

use crate::{
    projection::{Camera, DrawList, Projector},
    RenderError, Scene,
};

/// Something that can display a [`Scene`].
///
/// Showing a scene may block: a windowed renderer returns only once its
/// window is closed.
pub trait Renderer {
    /// Displays the scene.
    ///
    /// # Errors
    /// Returns [`RenderError::EmptyScene`] if the scene has nothing in it,
    /// or [`RenderError::Backend`] if the backend itself fails.
    fn show(&mut self, scene: &Scene) -> Result<(), RenderError>;
}

/// Projects a scene with the given camera into a viewport of `viewport` points.
///
/// # Errors
/// Returns [`RenderError::EmptyScene`] if the scene has no bounds to fit the
/// view to.
pub fn project_scene(
    scene: &Scene,
    camera: &Camera,
    viewport: DVec2,
) -> Result<DrawList, RenderError> {
    let bounds = match scene.bounds() {
        Some(bounds) if !scene.is_empty() => bounds,
        _ => return Err(RenderError::EmptyScene),
    };

    let projector = Projector::new(camera, &bounds, viewport);
    Ok(DrawList::build(scene, &projector))
}

/// A renderer that keeps the draw lists it was asked to show instead of
/// putting them on screen.
///
/// # Example
/// ```
/// use keplerian_plot::{create_sphere, RecordingRenderer, Renderer, SphereConfig};
///
/// let (scene, _) = create_sphere(&SphereConfig::default()).unwrap();
///
/// let mut renderer = RecordingRenderer::default();
/// renderer.show(&scene).unwrap();
///
/// assert_eq!(renderer.frames().len(), 1);
/// assert!(renderer.frames()[0].quad_count() > 0);
/// ```
#[derive(Clone, Debug)]
pub struct RecordingRenderer {
    /// The camera to project with.
    pub camera: Camera,

    /// The viewport size, in points.
    pub viewport: DVec2,

    frames: Vec<DrawList>,
}

impl RecordingRenderer {
    /// Creates a renderer with the given camera and viewport size.
    pub fn new(camera: Camera, viewport: DVec2) -> Self {
        Self {
            camera,
            viewport,
            frames: Vec::new(),
        }
    }

    /// Every draw list shown so far, oldest first.
    pub fn frames(&self) -> &[DrawList] {
        &self.frames
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new(Camera::default(), DVec2::new(800.0, 600.0))
    }
}

impl Renderer for RecordingRenderer {
    fn show(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let frame = project_scene(scene, &self.camera, self.viewport)?;
        tracing::debug!(items = frame.items.len(), "recorded frame");
        self.frames.push(frame);
        Ok(())
    }
}
