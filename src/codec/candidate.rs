//! Candidate decoder: the `image` crate's JPEG decoder (zune-jpeg underneath).

use std::io::Cursor;

use image::codecs::jpeg::JpegDecoder;
use image::{ColorType, ImageDecoder};

use crate::codec::{DecodedImage, Decoder};
use crate::error::{Error, Result};

const CODEC: &str = "image-jpeg";

/// The decoder under validation (selector `opt`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRsDecoder;

impl Decoder for ImageRsDecoder {
    fn id(&self) -> &str {
        CODEC
    }

    fn decode(&self, input: &mut Cursor<&[u8]>) -> Result<DecodedImage> {
        let decoder = JpegDecoder::new(input).map_err(|e| decode_error(e.to_string()))?;

        let (width, height) = decoder.dimensions();
        let color_type = decoder.color_type();
        let len = usize::try_from(decoder.total_bytes())
            .map_err(|_| decode_error(format!("{width}x{height} image does not fit in memory")))?;

        let mut buf = vec![0u8; len];
        decoder
            .read_image(&mut buf)
            .map_err(|e| decode_error(e.to_string()))?;

        let (width, height) = (width as usize, height as usize);
        let image = match color_type {
            ColorType::L8 => DecodedImage::gray(buf, width, height),
            ColorType::Rgb8 => DecodedImage::rgb(&buf, width, height),
            other => return Err(decode_error(format!("unsupported color type {other:?}"))),
        };

        image.ok_or_else(|| decode_error(format!("decoded an empty or truncated {width}x{height} image")))
    }
}

fn decode_error(message: impl Into<String>) -> Error {
    Error::Decode {
        codec: CODEC.to_string(),
        message: message.into(),
    }
}
