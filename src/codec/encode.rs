//! Comparison encoder backed by the `image` crate's baseline JPEG encoder.

use std::io::Write;

use image::ExtendedColorType;

use crate::codec::{DecodedImage, EncodeOptions, Encoder};
use crate::error::{Error, Result};

const CODEC: &str = "image-jpeg-encoder";

/// Deterministic JPEG encoder used to compare decoded images.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegEncoder;

impl Encoder for JpegEncoder {
    fn id(&self) -> &str {
        CODEC
    }

    fn encode(
        &self,
        image: &DecodedImage,
        options: &EncodeOptions,
        sink: &mut dyn Write,
    ) -> Result<()> {
        let width = u32::try_from(image.width()).map_err(|_| encode_error("width exceeds u32"))?;
        let height =
            u32::try_from(image.height()).map_err(|_| encode_error("height exceeds u32"))?;
        let color_type = match image {
            DecodedImage::Gray(_) => ExtendedColorType::L8,
            DecodedImage::Rgb(_) => ExtendedColorType::Rgb8,
        };

        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(sink, options.quality);
        encoder
            .encode(&image.to_bytes(), width, height, color_type)
            .map_err(|e| encode_error(e.to_string()))
    }
}

fn encode_error(message: impl Into<String>) -> Error {
    Error::Encode {
        codec: CODEC.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::codec::{Decoder, ImageRsDecoder, JpegDecoderRs};

    fn gradient(width: usize, height: usize) -> DecodedImage {
        let data: Vec<u8> = (0..width * height * 3).map(|i| ((i * 7) % 256) as u8).collect();
        DecodedImage::rgb(&data, width, height).unwrap()
    }

    #[test]
    fn test_encode_is_deterministic() {
        let image = gradient(32, 24);
        let options = EncodeOptions::comparison();
        let first = JpegEncoder.encode_to_vec(&image, &options).unwrap();
        let second = JpegEncoder.encode_to_vec(&image, &options).unwrap();
        assert!(first.starts_with(&[0xFF, 0xD8]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_encoded_output_decodes_with_both_decoders() {
        let encoded = JpegEncoder
            .encode_to_vec(&gradient(40, 16), &EncodeOptions::comparison())
            .unwrap();

        for decoder in [&JpegDecoderRs as &dyn Decoder, &ImageRsDecoder] {
            let decoded = decoder.decode(&mut Cursor::new(&encoded[..])).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (40, 16), "{}", decoder.id());
            assert_eq!(decoded.layout(), "rgb8");
        }
    }

    #[test]
    fn test_gray_stays_gray() {
        let image = DecodedImage::gray(vec![128; 64], 8, 8).unwrap();
        let encoded = JpegEncoder.encode_to_vec(&image, &EncodeOptions::comparison()).unwrap();
        let decoded = JpegDecoderRs.decode(&mut Cursor::new(&encoded[..])).unwrap();
        assert_eq!(decoded.layout(), "gray8");
    }
}
