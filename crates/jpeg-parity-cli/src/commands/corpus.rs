//! Corpus listing command.

use std::path::Path;

use anyhow::{Context, Result};
use jpeg_parity::corpus;

pub fn run(path: &Path) -> Result<()> {
    let walk = corpus::discover(path)
        .with_context(|| format!("Failed to open corpus {}", path.display()))?;

    let mut count = 0usize;
    let mut total_bytes = 0usize;
    for entry in walk {
        let entry = entry.with_context(|| format!("Failed to walk corpus {}", path.display()))?;
        println!("{}\t{}\t{}", entry.id(), entry.len(), entry.checksum());
        count += 1;
        total_bytes += entry.len();
    }

    eprintln!("Discovered {} JPEG files ({} bytes)", count, total_bytes);
    Ok(())
}
