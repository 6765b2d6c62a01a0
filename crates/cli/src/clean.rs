use rescat_core::emit::OutputWriter;
use std::path::PathBuf;
use tracing::info;

pub fn run(out: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    info!("Removing generated catalog at: {}...", out.display());
    if OutputWriter::new(&out).clean()? {
        info!("Generated catalog removed.");
    } else {
        info!("Nothing to remove.");
    }
    Ok(())
}
