// Vivenda - A multilingual real-estate marketing site built with Rust
// Copyright (C) 2025 Vivenda Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{Context, Result};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, Rgb, RgbImage};

/// Open Graph canvas, the size social platforms render previews at.
pub const OG_WIDTH: u32 = 1200;
pub const OG_HEIGHT: u32 = 630;

/// Background of the branded fallback card.
pub const BRAND_BACKGROUND: [u8; 3] = [0x12, 0x2b, 0x45];

/// Real OG images are social-preview thumbnails, so size wins over fidelity.
pub const OG_WEBP_QUALITY: f32 = 30.0;
/// The fallback card is flat color and compresses well; spend the quality.
pub const FALLBACK_WEBP_QUALITY: f32 = 82.0;
pub const PROXY_JPEG_QUALITY: u8 = 80;

/// Scale and center-crop to exactly `width`x`height`, discarding overflow.
pub fn cover_fit(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    img.resize_to_fill(width, height, FilterType::Lanczos3)
}

/// Lossy WebP encode. Works on the RGB projection of the image, so it cannot
/// fail on exotic pixel layouts.
pub fn encode_webp(img: &DynamicImage, quality: f32) -> Vec<u8> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    webp::Encoder::from_rgb(rgb.as_raw(), width, height)
        .encode(quality)
        .to_vec()
}

pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .context("Failed to encode JPEG")?;
    Ok(out)
}

pub fn solid_canvas(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// The branded placeholder served whenever a real OG image cannot be
/// produced. Fully local, so this path has nothing left to fail on.
pub fn og_fallback() -> Vec<u8> {
    let canvas = solid_canvas(OG_WIDTH, OG_HEIGHT, BRAND_BACKGROUND);
    encode_webp(&canvas, FALLBACK_WEBP_QUALITY)
}
