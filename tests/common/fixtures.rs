//! Synthetic images and review texts for integration tests.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use verity::ImageAsset;

pub const POSITIVE_REVIEW: &str = "Great product, works perfectly and I love it. Highly recommend!";

pub const NEGATIVE_REVIEW: &str = "Terrible quality, arrived broken. Total waste of money.";

pub const BACKDROP: Rgb<u8> = Rgb([255, 255, 255]);

/// Studio-style product photo: white backdrop, a red/blue block and a yellow stripe.
pub fn product_shot(size: u32) -> RgbImage {
    RgbImage::from_fn(size, size, |x, y| {
        let fx = x as f32 / size as f32;
        let fy = y as f32 / size as f32;

        if (0.25..0.75).contains(&fx) && (0.25..0.75).contains(&fy) {
            if (0.45..0.55).contains(&fy) {
                Rgb([240, 200, 20])
            } else if fx < 0.5 {
                Rgb([200, 30, 30])
            } else {
                Rgb([30, 30, 200])
            }
        } else {
            BACKDROP
        }
    })
}

/// A different product on the same backdrop: a green bottle with a dark cap.
pub fn bottle_shot(size: u32) -> RgbImage {
    RgbImage::from_fn(size, size, |x, y| {
        let fx = x as f32 / size as f32;
        let fy = y as f32 / size as f32;

        if (0.40..0.60).contains(&fx) && (0.30..0.85).contains(&fy) {
            Rgb([30, 160, 60])
        } else if (0.45..0.55).contains(&fx) && (0.15..0.30).contains(&fy) {
            Rgb([40, 40, 40])
        } else {
            BACKDROP
        }
    })
}

/// Deterministic RGB noise (LCG).
pub fn noise(size: u32, seed: u64) -> RgbImage {
    let mut state = seed;
    RgbImage::from_fn(size, size, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let v = (state >> 33) as u32;
        Rgb([(v & 0xff) as u8, ((v >> 8) & 0xff) as u8, ((v >> 16) & 0xff) as u8])
    })
}

pub fn inverted(image: &RgbImage) -> RgbImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        for c in pixel.0.iter_mut() {
            *c = 255 - *c;
        }
    }
    out
}

pub fn encode(image: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("encoding a synthetic image should succeed");
    buf
}

pub fn png_asset(image: &RgbImage) -> ImageAsset {
    ImageAsset::from_bytes(encode(image, ImageFormat::Png))
}

/// Writes `image` under `dir` and returns its path.
pub fn write_image(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("writing a synthetic image should succeed");
    path
}
