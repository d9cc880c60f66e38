use base64::{engine::general_purpose, Engine};
use image::{codecs::jpeg::JpegEncoder, DynamicImage};
use std::io::Cursor;

use crate::core::errors::{EncodeError, EncodeResult};

/// Column width of the transport payload; decoders on the annotate
/// endpoint accept the line-wrapped variant.
pub const BASE64_LINE_LENGTH: usize = 64;

/// Serialize an image to JPEG at the given quality (0.0..=1.0).
///
/// A zero-size image cannot produce a payload and fails with `NoData`.
pub fn encode_jpeg(image: &DynamicImage, quality: f32) -> EncodeResult<Vec<u8>> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::NoData { width, height });
    }

    let quality = ((quality.clamp(0.0, 1.0) * 100.0).round() as u8).max(1);

    let mut bytes = Vec::new();
    let mut cursor = Cursor::new(&mut bytes);
    let encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
    image.write_with_encoder(encoder)?;

    if bytes.is_empty() {
        return Err(EncodeError::NoData { width, height });
    }

    Ok(bytes)
}

/// Asynchronously encode an image to JPEG bytes using spawn_blocking.
///
/// JPEG encoding is CPU-intensive and can block the async runtime if done
/// synchronously.
pub async fn encode_jpeg_async(image: DynamicImage, quality: f32) -> EncodeResult<Vec<u8>> {
    tokio::task::spawn_blocking(move || encode_jpeg(&image, quality))
        .await
        .map_err(|e| EncodeError::Task(e.to_string()))?
}

/// Base64-encode bytes for JSON transport, wrapped at 64 columns.
pub fn transport_base64(bytes: &[u8]) -> String {
    let encoded = general_purpose::STANDARD.encode(bytes);
    let mut wrapped = String::with_capacity(encoded.len() + 2 * (encoded.len() / BASE64_LINE_LENGTH + 1));
    for (i, chunk) in encoded.as_bytes().chunks(BASE64_LINE_LENGTH).enumerate() {
        if i > 0 {
            wrapped.push_str("\r\n");
        }
        // base64 output is ASCII, so any chunk boundary is a char boundary
        wrapped.push_str(std::str::from_utf8(chunk).expect("base64 output is ASCII"));
    }
    wrapped
}

/// Full encoder stage: JPEG at the given quality, then the wrapped base64
/// transport payload.
pub async fn jpeg_base64_payload(image: DynamicImage, quality: f32) -> EncodeResult<String> {
    let bytes = encode_jpeg_async(image, quality).await?;
    Ok(transport_base64(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn sample_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 40, 40])))
    }

    #[tokio::test]
    async fn payload_round_trips_through_base64() {
        let payload = jpeg_base64_payload(sample_image(32, 16), 0.8).await.unwrap();

        let joined: String = payload.split("\r\n").collect();
        let bytes = general_purpose::STANDARD.decode(joined).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (32, 16));
    }

    #[tokio::test]
    async fn payload_lines_respect_wrap_width() {
        let payload = jpeg_base64_payload(sample_image(64, 64), 1.0).await.unwrap();
        assert!(payload.lines().all(|line| line.len() <= BASE64_LINE_LENGTH));
        assert!(payload.lines().count() > 1);
    }

    #[test]
    fn zero_size_image_yields_no_data() {
        let empty = DynamicImage::new_rgb8(0, 0);
        assert!(matches!(
            encode_jpeg(&empty, 1.0),
            Err(EncodeError::NoData { width: 0, height: 0 })
        ));
    }

    #[test]
    fn quality_is_clamped_to_unit_interval() {
        let img = sample_image(8, 8);
        assert!(encode_jpeg(&img, -1.0).is_ok());
        assert!(encode_jpeg(&img, 2.0).is_ok());
    }
}
