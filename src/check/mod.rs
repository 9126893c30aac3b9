//! Differential correctness checking.
//!
//! Every corpus entry is decoded by the reference and the candidate, both
//! images are re-encoded with [`EncodeOptions::comparison`], and the two byte
//! streams must be identical. The encoder is a pure function of its inputs,
//! so equal bytes stand in for equal pixels without touching raw buffers.
//!
//! - [`DifferentialChecker::check_entry`]: one entry, one `Result`
//! - [`DifferentialChecker::check_corpus`]: a whole walk, failures collected per entry
//! - [`check_determinism`]: one decoder against itself on a rewound stream

pub mod report;

use std::io::Cursor;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub use report::{CheckReport, EntryOutcome};

use crate::codec::{DecodedImage, Decoder, EncodeOptions, Encoder};
use crate::corpus::CorpusEntry;
use crate::error::{Error, Result};

/// Successful comparison of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Decoded width.
    pub width: usize,
    /// Decoded height.
    pub height: usize,
    /// Length of the (identical) re-encodings.
    pub encoded_len: usize,
}

/// Compares a candidate decoder against a reference through a shared encoder.
pub struct DifferentialChecker<'a> {
    reference: &'a dyn Decoder,
    candidate: &'a dyn Decoder,
    encoder: &'a dyn Encoder,
    options: EncodeOptions,
}

impl<'a> DifferentialChecker<'a> {
    /// Create a checker using the fixed comparison options.
    #[must_use]
    pub fn new(
        reference: &'a dyn Decoder,
        candidate: &'a dyn Decoder,
        encoder: &'a dyn Encoder,
    ) -> Self {
        Self {
            reference,
            candidate,
            encoder,
            options: EncodeOptions::comparison(),
        }
    }

    /// Identifier of the reference decoder.
    #[must_use]
    pub fn reference_id(&self) -> &str {
        self.reference.id()
    }

    /// Identifier of the candidate decoder.
    #[must_use]
    pub fn candidate_id(&self) -> &str {
        self.candidate.id()
    }

    /// Compare both decoders on one entry.
    pub fn check_entry(&self, entry: &CorpusEntry) -> Result<Comparison> {
        let mut input = Cursor::new(entry.content());

        let image_a = decode_rewound(self.reference, &mut input)?;
        let image_b = decode_rewound(self.candidate, &mut input)?;

        let bytes_a = self.encoder.encode_to_vec(&image_a, &self.options)?;
        let bytes_b = self.encoder.encode_to_vec(&image_b, &self.options)?;

        compare_encoded(&entry.id(), &bytes_a, &bytes_b)?;

        Ok(Comparison {
            width: image_a.width(),
            height: image_a.height(),
            encoded_len: bytes_a.len(),
        })
    }

    /// Check every entry of a corpus walk.
    ///
    /// Entry-level failures are recorded in the report and never stop the run.
    /// A walk-level error (missing root, unreadable file) aborts and is returned.
    pub fn check_corpus<I>(&self, entries: I) -> Result<CheckReport>
    where
        I: IntoIterator<Item = Result<CorpusEntry>>,
    {
        let mut report = CheckReport::new(self.reference.id(), self.candidate.id());

        for entry in entries {
            let entry = entry?;
            let id = entry.id();

            match self.check_entry(&entry) {
                Ok(comparison) => {
                    debug!("{id}: identical ({} bytes re-encoded)", comparison.encoded_len);
                    report.outcomes.push(EntryOutcome::passed(id, &entry, comparison));
                }
                Err(err) => {
                    warn!("{id}: {err}");
                    report.outcomes.push(EntryOutcome::failed(id, &entry, &err));
                }
            }
        }

        Ok(report)
    }
}

/// Decode the same rewound stream twice with one decoder and require
/// byte-identical re-encodings. Returns the re-encoded length.
pub fn check_determinism(
    decoder: &dyn Decoder,
    encoder: &dyn Encoder,
    entry: &CorpusEntry,
) -> Result<usize> {
    let options = EncodeOptions::comparison();
    let mut input = Cursor::new(entry.content());

    let first = decode_rewound(decoder, &mut input)?;
    let second = decode_rewound(decoder, &mut input)?;

    let bytes_first = encoder.encode_to_vec(&first, &options)?;
    let bytes_second = encoder.encode_to_vec(&second, &options)?;

    compare_encoded(&entry.id(), &bytes_first, &bytes_second)?;
    Ok(bytes_first.len())
}

fn decode_rewound(decoder: &dyn Decoder, input: &mut Cursor<&[u8]>) -> Result<DecodedImage> {
    input.set_position(0);
    let image = decoder.decode(input)?;
    if image.is_empty() {
        return Err(Error::Decode {
            codec: decoder.id().to_string(),
            message: "decoded an empty image".to_string(),
        });
    }
    Ok(image)
}

fn compare_encoded(entry: &str, reference: &[u8], candidate: &[u8]) -> Result<()> {
    if reference == candidate {
        return Ok(());
    }

    let first_difference = reference
        .iter()
        .zip(candidate)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| reference.len().min(candidate.len()));

    Err(Error::ComparisonMismatch {
        entry: entry.to_string(),
        reference_len: reference.len(),
        candidate_len: candidate.len(),
        first_difference,
    })
}
