use rescat_core::config::GeneratorConfig;
use std::path::PathBuf;
use tracing::info;

pub fn run(
    root: PathBuf,
    out: PathBuf,
    config: GeneratorConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let generator = rescat_runtime::build_default_generator(root.clone(), out.clone(), config);

    info!("Generating catalog for {}...", root.display());
    let report = generator.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (kind, count) in &report.resources {
        println!("{:<14}{}", kind.as_str(), count);
    }
    println!("Shards:       {}", report.shards.len());
    for collision in &report.collisions {
        println!(
            "Renamed {}:{} to '{}' ('{}' was taken)",
            collision.kind, collision.name, collision.assigned, collision.base
        );
    }
    if report.changed {
        println!(
            "Wrote {} files to {}",
            report.files_written,
            out.display()
        );
    } else {
        println!("{} is up to date", out.display());
    }
    Ok(())
}
