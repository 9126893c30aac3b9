//! Standalone decode: open one fixture, decode it, print its dimensions.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use jpeg_parity::Implementation;

pub fn run(fixture: &Path, implementation: Implementation) -> Result<()> {
    let data = std::fs::read(fixture)
        .with_context(|| format!("Failed to open {}", fixture.display()))?;

    let image = implementation
        .decoder()
        .decode(&mut Cursor::new(&data[..]))
        .with_context(|| format!("Failed to decode {}", fixture.display()))?;

    println!("{}x{}", image.width(), image.height());
    Ok(())
}
