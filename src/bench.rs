//! Decode benchmark driver.
//!
//! The driver only knows which implementation to exercise. Iteration counts,
//! timing and statistics belong to the benchmarking framework that calls
//! [`BenchDriver::decode_once`] (criterion, see `benches/decode.rs`).

use std::ffi::OsStr;
use std::io::Cursor;

use crate::codec::{DecodedImage, Decoder, Implementation};
use crate::error::{Error, Result};

/// Environment variable read by the bench harness to pick an implementation.
pub const SELECTOR_ENV: &str = "BENCH_FN";

/// Stateless decode loop body for one selected implementation.
pub struct BenchDriver {
    implementation: Implementation,
    decoder: Box<dyn Decoder>,
}

impl BenchDriver {
    /// Create a driver for an already parsed implementation.
    #[must_use]
    pub fn new(implementation: Implementation) -> Self {
        Self {
            implementation,
            decoder: implementation.decoder(),
        }
    }

    /// Create a driver from a selector value, failing on unknown selectors.
    pub fn from_selector(selector: &str) -> Result<Self> {
        Implementation::from_selector(selector).map(Self::new)
    }

    /// Create a driver from the raw value of [`SELECTOR_ENV`].
    ///
    /// An unset variable selects the reference. A value that is not valid
    /// UTF-8 is a `Config` error like any other unknown selector.
    pub fn from_env_value(value: Option<&OsStr>) -> Result<Self> {
        let selector = match value {
            None => "",
            Some(raw) => raw.to_str().ok_or_else(|| {
                Error::Config(format!("{SELECTOR_ENV} is not valid UTF-8: {raw:?}"))
            })?,
        };
        Self::from_selector(selector)
    }

    /// Selected implementation.
    #[must_use]
    pub fn implementation(&self) -> Implementation {
        self.implementation
    }

    /// Identifier of the decoder being exercised.
    #[must_use]
    pub fn decoder_id(&self) -> &str {
        self.decoder.id()
    }

    /// Rewind `input` and decode it once.
    ///
    /// The result is returned so the harness can pass it through its
    /// `black_box`. Callers measuring cost are free to ignore decode errors.
    pub fn decode_once(&self, input: &mut Cursor<&[u8]>) -> Result<DecodedImage> {
        input.set_position(0);
        self.decoder.decode(input)
    }
}
