//! Whole-program parity: this executable's `dims` run once per decoder.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use jpeg_parity::{ExecutableParity, Implementation};
use log::info;

pub fn run(fixture: &Path) -> Result<()> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;

    let dims = |implementation: Implementation| {
        let mut cmd = Command::new(&exe);
        cmd.arg("dims")
            .arg("--decoder")
            .arg(implementation.selector())
            .arg(fixture);
        cmd
    };

    let shared = ExecutableParity::new(dims(Implementation::Reference), dims(Implementation::Candidate))
        .check()
        .with_context(|| format!("Parity check failed for {}", fixture.display()))?;

    info!("Both decoders agree on {}", fixture.display());
    print!("{}", shared.text());
    Ok(())
}
