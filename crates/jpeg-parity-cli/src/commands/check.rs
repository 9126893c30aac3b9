//! Differential correctness commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use jpeg_parity::{
    DifferentialChecker, EntryOutcome, ImageRsDecoder, Implementation, JpegDecoderRs,
    JpegEncoder, check_determinism, corpus,
};
use log::info;

pub fn run(path: &Path, json: Option<&Path>, csv: Option<&Path>) -> Result<()> {
    let walk = corpus::discover(path)
        .with_context(|| format!("Failed to open corpus {}", path.display()))?;

    let checker = DifferentialChecker::new(&JpegDecoderRs, &ImageRsDecoder, &JpegEncoder);
    info!(
        "Comparing {} against {} on {}",
        checker.candidate_id(),
        checker.reference_id(),
        path.display()
    );

    let report = checker
        .check_corpus(walk)
        .with_context(|| format!("Failed to walk corpus {}", path.display()))?;

    for outcome in &report.outcomes {
        match outcome {
            EntryOutcome::Passed { entry, comparison, .. } => {
                println!("ok    {entry} ({}x{})", comparison.width, comparison.height);
            }
            EntryOutcome::Failed { entry, error, .. } => println!("FAIL  {entry}: {error}"),
        }
    }
    println!("{} passed, {} failed", report.passed(), report.failed());

    if let Some(json_path) = json {
        report
            .write_json(json_path)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        info!("Saved JSON report to: {}", json_path.display());
    }
    if let Some(csv_path) = csv {
        report
            .write_csv(csv_path)
            .with_context(|| format!("Failed to write {}", csv_path.display()))?;
        info!("Saved CSV summary to: {}", csv_path.display());
    }

    if !report.is_success() {
        bail!("{} of {} entries diverged", report.failed(), report.outcomes.len());
    }
    Ok(())
}

pub fn determinism(path: &Path, implementation: Implementation) -> Result<()> {
    let walk = corpus::discover(path)
        .with_context(|| format!("Failed to open corpus {}", path.display()))?;
    let decoder = implementation.decoder();

    let mut failed = 0usize;
    for entry in walk {
        let entry = entry.with_context(|| format!("Failed to walk corpus {}", path.display()))?;
        match check_determinism(decoder.as_ref(), &JpegEncoder, &entry) {
            Ok(_) => println!("ok    {}", entry.id()),
            Err(err) => {
                failed += 1;
                println!("FAIL  {}: {err}", entry.id());
            }
        }
    }

    if failed > 0 {
        bail!("{} is not deterministic on {failed} entries", decoder.id());
    }
    Ok(())
}
