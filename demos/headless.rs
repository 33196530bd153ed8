use glam::DVec2;
use keplerian_plot::{
    create_sphere, plot_orbit_ellipse, projection::Camera, OrbitElements, RecordingRenderer,
    Renderer, SphereConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let (mut scene, mesh) = create_sphere(&SphereConfig::earth().with_transparency(1.0))?;

    let orbits = [
        ("LEO", OrbitElements::new(51.6, 0.0, 0.0, 6_771.0, 0.0005)),
        ("Molniya", OrbitElements::new(63.4, 90.0, 270.0, 26_600.0, 0.74)),
        ("GEO", OrbitElements::new(0.0, 0.0, 0.0, 42_164.0, 0.0)),
    ];

    for (name, elements) in &orbits {
        let curve = plot_orbit_ellipse(&mut scene, elements)?;
        let highest = curve
            .points()
            .iter()
            .map(|p| p.z)
            .fold(f64::NEG_INFINITY, f64::max);
        println!("{name}: {} points, highest z = {highest:.1} km", curve.len());
    }

    let mut renderer = RecordingRenderer::new(Camera::default(), DVec2::new(1024.0, 768.0));
    renderer.show(&scene)?;

    for frame in renderer.frames() {
        println!(
            "sphere: {} points -> {} quads, {} lines",
            mesh.len(),
            frame.quad_count(),
            frame.polyline_count()
        );
    }

    Ok(())
}
