use keplerian_plot::{create_sphere, plot_orbit_ellipse, viewer, OrbitElements, SphereConfig};
use tracing_subscriber::EnvFilter;

/// Set to `false` to show the Earth on its own.
const SHOW_ORBIT: bool = true;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("keplerian_plot=info")),
        )
        .init();

    let (mut scene, mesh) = create_sphere(&SphereConfig::earth().with_transparency(1.0))?;
    tracing::info!(points = mesh.len(), "created the Earth");

    if SHOW_ORBIT {
        let orbit = OrbitElements::new(0.0, 45.0, 80.0, 10_000.0, 0.99);
        let curve = plot_orbit_ellipse(&mut scene, &orbit)?;
        tracing::info!(points = curve.len(), "plotted orbit");
    }

    viewer::show(&scene)?;
    Ok(())
}
