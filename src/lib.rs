//! # jpeg-parity
//!
//! Validates that a candidate JPEG decoder is a drop-in replacement for a
//! reference decoder: same output on a corpus, same whole-program behavior,
//! and measurably faster.
//!
//! Decoders and the comparison encoder are opaque capability providers behind
//! the [`Decoder`] and [`Encoder`] traits. This crate supplies the harness.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jpeg_parity::{corpus, DifferentialChecker, ImageRsDecoder, JpegDecoderRs, JpegEncoder};
//!
//! let checker = DifferentialChecker::new(&JpegDecoderRs, &ImageRsDecoder, &JpegEncoder);
//! let report = checker.check_corpus(corpus::discover("testdata")?)?;
//! assert!(report.is_success());
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`corpus`]: Lazy corpus discovery
//! - [`codec`]: Decoded images, codec traits and the implementation selector
//! - [`check`]: Differential correctness checker and reports
//! - [`parity`]: Executable parity checks over captured process output
//! - [`bench`]: Benchmark driver

pub mod bench;
pub mod check;
pub mod codec;
pub mod corpus;
pub mod error;
pub mod parity;

// Re-export commonly used types
pub use bench::BenchDriver;
pub use check::{CheckReport, Comparison, DifferentialChecker, EntryOutcome, check_determinism};
pub use codec::{
    DecodedImage, Decoder, EncodeOptions, Encoder, ImageRsDecoder, Implementation, JpegDecoderRs,
    JpegEncoder,
};
pub use corpus::{CorpusEntry, CorpusWalk, discover};
pub use error::{Error, Result};
pub use parity::{CapturedOutput, ExecutableParity, run_captured};
