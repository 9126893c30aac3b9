//! Decoder/encoder capabilities and the decoded image type.
//!
//! The harness never looks inside a codec. Implementations are plugged in
//! through two traits:
//!
//! - [`Decoder`]: reads one JPEG from a cursor positioned at offset zero
//! - [`Encoder`]: writes a [`DecodedImage`] to a sink for a fixed [`EncodeOptions`]
//!
//! [`Implementation`] names the two decoders under comparison and is the
//! configuration value handed to the benchmark driver.

mod candidate;
mod encode;
mod reference;

use std::fmt;
use std::io::{Cursor, Write};
use std::str::FromStr;

use imgref::ImgVec;
use rgb::RGB8;
use serde::{Deserialize, Serialize};

pub use candidate::ImageRsDecoder;
pub use encode::JpegEncoder;
pub use reference::JpegDecoderRs;

use crate::error::{Error, Result};

/// Pixels produced by one decode call.
#[derive(Debug, Clone)]
pub enum DecodedImage {
    /// Single-channel 8-bit image.
    Gray(ImgVec<u8>),

    /// Three-channel 8-bit image.
    Rgb(ImgVec<RGB8>),
}

impl DecodedImage {
    /// Build a grayscale image from row-major samples.
    ///
    /// Returns `None` if either dimension is zero or `data` has the wrong length.
    #[must_use]
    pub fn gray(data: Vec<u8>, width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != width.checked_mul(height)? {
            return None;
        }
        Some(Self::Gray(ImgVec::new(data, width, height)))
    }

    /// Build an RGB image from row-major interleaved `r, g, b` bytes.
    ///
    /// Returns `None` if either dimension is zero or `data` has the wrong length.
    #[must_use]
    pub fn rgb(data: &[u8], width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != width.checked_mul(height)?.checked_mul(3)? {
            return None;
        }
        let pixels = data
            .chunks_exact(3)
            .map(|c| RGB8::new(c[0], c[1], c[2]))
            .collect();
        Some(Self::Rgb(ImgVec::new(pixels, width, height)))
    }

    /// Image width.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Gray(img) => img.width(),
            Self::Rgb(img) => img.width(),
        }
    }

    /// Image height.
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Gray(img) => img.height(),
            Self::Rgb(img) => img.height(),
        }
    }

    /// Zero-value image: nothing was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Pixel layout name.
    #[must_use]
    pub fn layout(&self) -> &'static str {
        match self {
            Self::Gray(_) => "gray8",
            Self::Rgb(_) => "rgb8",
        }
    }

    /// Row-major sample bytes, ignoring any stride padding.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Gray(img) => img.pixels().collect(),
            Self::Rgb(img) => img.pixels().flat_map(|p| [p.r, p.g, p.b]).collect(),
        }
    }
}

/// Encoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// JPEG quality, 1-100.
    pub quality: u8,
}

impl EncodeOptions {
    /// Quality used when comparing two decodes: maximal and deterministic.
    pub const COMPARISON_QUALITY: u8 = 100;

    /// Options used on both sides of every comparison.
    #[must_use]
    pub fn comparison() -> Self {
        Self {
            quality: Self::COMPARISON_QUALITY,
        }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::comparison()
    }
}

/// JPEG decoding capability.
pub trait Decoder {
    /// Identifier used in reports and errors (e.g. "jpeg-decoder").
    fn id(&self) -> &str;

    /// Decode one image. `input` is positioned at offset zero.
    ///
    /// Must leave nothing behind that changes the result of a later call on a
    /// rewound cursor over the same bytes.
    fn decode(&self, input: &mut Cursor<&[u8]>) -> Result<DecodedImage>;
}

/// Image encoding capability.
pub trait Encoder {
    /// Identifier used in reports and errors.
    fn id(&self) -> &str;

    /// Encode `image` into `sink`. Must be a pure function of `(image, options)`.
    fn encode(&self, image: &DecodedImage, options: &EncodeOptions, sink: &mut dyn Write)
    -> Result<()>;

    /// Encode into a fresh buffer.
    fn encode_to_vec(&self, image: &DecodedImage, options: &EncodeOptions) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode(image, options, &mut out)?;
        Ok(out)
    }
}

/// Which of the two decoders to exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Implementation {
    /// Trusted baseline, selector `std`.
    #[default]
    Reference,
    /// Decoder under validation, selector `opt`.
    Candidate,
}

impl Implementation {
    /// Both implementations, reference first.
    pub const ALL: [Self; 2] = [Self::Reference, Self::Candidate];

    /// Parse a selector value. Empty means `std`; anything unrecognized is an error.
    pub fn from_selector(selector: &str) -> Result<Self> {
        match selector {
            "std" | "" => Ok(Self::Reference),
            "opt" => Ok(Self::Candidate),
            other => Err(Error::Config(format!(
                "undefined implementation selector {other:?} (expected \"std\" or \"opt\")"
            ))),
        }
    }

    /// Selector string for this implementation.
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            Self::Reference => "std",
            Self::Candidate => "opt",
        }
    }

    /// Instantiate the decoder behind this selector.
    #[must_use]
    pub fn decoder(self) -> Box<dyn Decoder> {
        match self {
            Self::Reference => Box::new(JpegDecoderRs),
            Self::Candidate => Box::new(ImageRsDecoder),
        }
    }
}

impl FromStr for Implementation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_selector(s)
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}
