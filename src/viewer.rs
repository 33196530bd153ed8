//! A native window that shows a scene.
//!
//! Drag to rotate the camera, scroll to zoom. The window blocks the calling
//! thread until it is closed.

use eframe::egui;
use glam::DVec2;

use crate::{
    projection::{Camera, DrawItem, DrawList},
    render::project_scene,
    Color, RenderError, Renderer, Scene,
};

const DEFAULT_TITLE: &str = "keplerian_plot";
const ZOOM_PER_SCROLL_POINT: f64 = 0.002;
const AXIS_COLOR: egui::Color32 = egui::Color32::from_gray(140);

/// A [`Renderer`] that opens a window with eframe.
#[derive(Clone, Debug)]
pub struct Viewer {
    /// The camera the window opens with.
    pub camera: Camera,

    /// The initial window size, in points.
    pub window_size: [f32; 2],
}

impl Default for Viewer {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            window_size: [800.0, 700.0],
        }
    }
}

impl Renderer for Viewer {
    fn show(&mut self, scene: &Scene) -> Result<(), RenderError> {
        if scene.is_empty() {
            return Err(RenderError::EmptyScene);
        }

        let title = if scene.title().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            scene.title().to_string()
        };

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(self.window_size)
                .with_title(title.clone()),
            ..Default::default()
        };

        let app = SceneApp {
            scene: scene.clone(),
            camera: self.camera,
        };

        tracing::info!(primitives = scene.primitives().len(), "opening viewer window");

        eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        tracing::info!("viewer window closed");
        Ok(())
    }
}

/// Shows a scene in a window with the default camera, blocking until the
/// window is closed.
pub fn show(scene: &Scene) -> Result<(), RenderError> {
    Viewer::default().show(scene)
}

struct SceneApp {
    scene: Scene,
    camera: Camera,
}

impl eframe::App for SceneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::drag());

                if response.dragged() {
                    let delta = response.drag_delta();
                    self.camera.orbit_by(delta.x as f64, delta.y as f64);
                }

                if response.hovered() {
                    let scroll = ui.input(|i| i.smooth_scroll_delta.y) as f64;
                    if scroll != 0.0 {
                        self.camera.zoom_by((scroll * ZOOM_PER_SCROLL_POINT).exp());
                    }
                }

                let rect = response.rect;
                let viewport = DVec2::new(rect.width() as f64, rect.height() as f64);

                match project_scene(&self.scene, &self.camera, viewport) {
                    Ok(list) => paint(&painter, rect.min, &list),
                    Err(e) => {
                        painter.text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            e.to_string(),
                            egui::FontId::proportional(16.0),
                            egui::Color32::DARK_RED,
                        );
                    }
                }
            });
    }
}

fn paint(painter: &egui::Painter, origin: egui::Pos2, list: &DrawList) {
    let to_pos = |p: DVec2| origin + egui::vec2(p.x as f32, p.y as f32);

    for axis in &list.axes {
        let (from, to) = (to_pos(axis.from), to_pos(axis.to));
        painter.line_segment([from, to], egui::Stroke::new(1.0, AXIS_COLOR));
        painter.text(
            to,
            egui::Align2::LEFT_BOTTOM,
            &axis.label,
            egui::FontId::proportional(13.0),
            to_color32(Color::BLACK, 1.0),
        );
    }

    for item in &list.items {
        match item {
            DrawItem::Quad {
                corners,
                color,
                alpha,
            } => {
                let points = corners.iter().map(|&c| to_pos(c)).collect();
                painter.add(egui::Shape::convex_polygon(
                    points,
                    to_color32(*color, *alpha),
                    egui::Stroke::NONE,
                ));
            }
            DrawItem::Polyline {
                points,
                color,
                width,
            } => {
                let points = points.iter().map(|&p| to_pos(p)).collect();
                painter.add(egui::Shape::line(
                    points,
                    egui::Stroke::new(*width, to_color32(*color, 1.0)),
                ));
            }
        }
    }
}

fn to_color32(color: Color, alpha: f32) -> egui::Color32 {
    let [r, g, b] = color.to_rgb8();
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}
