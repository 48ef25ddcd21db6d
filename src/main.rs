// main.rs — build a sphere from CLI/env/file parameters and optionally dump it

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use uv_sphere::config::AppConfig;
use uv_sphere::SphereMesh;

/// Write `mesh` as JSON. The buffer is flushed explicitly so a failed write
/// surfaces here instead of being dropped.
fn write_mesh(path: &Path, mesh: &SphereMesh) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, mesh)?;
    writer.flush()
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::resolve()?;
    let mesh = SphereMesh::build(config.params)?;

    log::info!(
        "sphere r={} ({} sectors x {} stacks, aspect {}): {} vertices, {} indices, {} triangles",
        config.params.radius,
        config.params.sector_count,
        config.params.stack_count,
        config.params.aspect_ratio,
        mesh.vertex_count(),
        mesh.index_count(),
        mesh.triangle_count()
    );

    if let Some(path) = config.output {
        write_mesh(&path, &mesh)?;
        log::info!("wrote mesh to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
