//! Reference decoder backed by the `jpeg-decoder` crate.

use std::io::Cursor;

use crate::codec::{DecodedImage, Decoder};
use crate::error::{Error, Result};

const CODEC: &str = "jpeg-decoder";

/// The trusted baseline decoder (selector `std`).
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegDecoderRs;

impl Decoder for JpegDecoderRs {
    fn id(&self) -> &str {
        CODEC
    }

    fn decode(&self, input: &mut Cursor<&[u8]>) -> Result<DecodedImage> {
        let mut decoder = jpeg_decoder::Decoder::new(input);
        let pixels = decoder.decode().map_err(|e| decode_error(e.to_string()))?;

        let info = decoder
            .info()
            .ok_or_else(|| decode_error("Missing JPEG info after decode"))?;

        let width = info.width as usize;
        let height = info.height as usize;

        let image = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => DecodedImage::rgb(&pixels, width, height),
            jpeg_decoder::PixelFormat::L8 => DecodedImage::gray(pixels, width, height),
            jpeg_decoder::PixelFormat::L16 => {
                // Keep the high byte (samples are big endian)
                let high = pixels.chunks_exact(2).map(|c| c[0]).collect();
                DecodedImage::gray(high, width, height)
            }
            jpeg_decoder::PixelFormat::CMYK32 => {
                return Err(decode_error("CMYK JPEGs are not supported"));
            }
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
