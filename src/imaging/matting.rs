use std::collections::VecDeque;

use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use super::error::ImagingError;
use crate::constants::{DEFAULT_BORDER_UNIFORMITY, DEFAULT_MATTE_TOLERANCE, MIN_SUBJECT_FRACTION};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Isolates the subject of an image by removing its background.
///
/// Implementations must be pure with respect to their input: the same image always
/// yields the same output, and nothing is cached between calls.
pub trait BackgroundRemover: Send + Sync {
    fn remove(&self, image: &DynamicImage) -> Result<DynamicImage, ImagingError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MattingConfig {
    /// Max per-channel distance from the key colour for a pixel to count as background.
    pub tolerance: u8,
    /// Max mean border deviation from the key colour; above it the frame is not a backdrop.
    pub border_uniformity: f64,
}

impl Default for MattingConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_MATTE_TOLERANCE,
            border_uniformity: DEFAULT_BORDER_UNIFORMITY,
        }
    }
}

impl MattingConfig {
    pub const ENV_TOLERANCE: &'static str = "VERITY_MATTE_TOLERANCE";

    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<(), ImagingError> {
        if !self.border_uniformity.is_finite() || self.border_uniformity < 0.0 {
            return Err(ImagingError::InvalidConfig {
                reason: format!(
                    "border_uniformity must be a non-negative number, got {}",
                    self.border_uniformity
                ),
            });
        }
        Ok(())
    }

    /// Reads the tolerance override; unset or blank keeps the default.
    pub fn from_env() -> Result<Self, ImagingError> {
        let defaults = Self::default();
        let Ok(value) = std::env::var(Self::ENV_TOLERANCE) else {
            return Ok(defaults);
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(defaults);
        }

        let tolerance = trimmed
            .parse()
            .map_err(|source| ImagingError::InvalidTolerance { value, source })?;
        Ok(defaults.with_tolerance(tolerance))
    }
}

/// Border-keyed matting for studio-style photos.
///
/// The key colour is the per-channel median of the frame border. Pixels close to it
/// and 4-connected to the border become transparent black.
#[derive(Debug, Clone, Default)]
pub struct BorderKeyMatting {
    config: MattingConfig,
}

impl BorderKeyMatting {
    pub fn new(config: MattingConfig) -> Result<Self, ImagingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MattingConfig {
        &self.config
    }

    fn is_background(&self, pixel: &Rgba<u8>, key: [u8; 3]) -> bool {
        pixel[3] == 0
            || pixel
                .0
                .iter()
                .take(3)
                .zip(key)
                .all(|(&c, k)| c.abs_diff(k) <= self.config.tolerance)
    }
}

impl BackgroundRemover for BorderKeyMatting {
    fn remove(&self, image: &DynamicImage) -> Result<DynamicImage, ImagingError> {
        let mut rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width < 3 || height < 3 {
            return Err(ImagingError::TooSmall { width, height });
        }

        let border = border_coordinates(width, height);
        let key = median_colour(&rgba, &border);
        let deviation = mean_deviation(&rgba, &border, key);

        if deviation > self.config.border_uniformity {
            debug!(
                deviation,
                limit = self.config.border_uniformity,
                "Border is not uniform, keeping image as-is"
            );
            return Ok(image.clone());
        }

        let mask = flood_background(&rgba, &border, |p| self.is_background(p, key));
        let removed = mask.iter().filter(|&&m| m).count();
        let total = (width as usize) * (height as usize);
        let remaining = (total - removed) as f64 / total as f64;

        if remaining < MIN_SUBJECT_FRACTION {
            debug!(remaining, "Keying would erase the subject, keeping image as-is");
            return Ok(image.clone());
        }

        for (idx, pixel) in rgba.pixels_mut().enumerate() {
            if mask[idx] {
                *pixel = TRANSPARENT;
            }
        }

        debug!(
            key = ?key,
            removed,
            total,
            "Background removed"
        );

        Ok(DynamicImage::ImageRgba8(rgba))
    }

    fn name(&self) -> &'static str {
        "border-key"
    }
}

fn border_coordinates(width: u32, height: u32) -> Vec<(u32, u32)> {
    let mut coords = Vec::with_capacity(2 * (width + height) as usize);
    for x in 0..width {
        coords.push((x, 0));
        coords.push((x, height - 1));
    }
    for y in 1..height - 1 {
        coords.push((0, y));
        coords.push((width - 1, y));
    }
    coords
}

fn median_colour(image: &RgbaImage, coords: &[(u32, u32)]) -> [u8; 3] {
    let mut key = [0u8; 3];
    for (channel, slot) in key.iter_mut().enumerate() {
        let mut values: Vec<u8> = coords
            .iter()
            .map(|&(x, y)| image.get_pixel(x, y)[channel])
            .collect();
        values.sort_unstable();
        *slot = values[values.len() / 2];
    }
    key
}

fn mean_deviation(image: &RgbaImage, coords: &[(u32, u32)], key: [u8; 3]) -> f64 {
    let total: u64 = coords
        .iter()
        .map(|&(x, y)| {
            let pixel = image.get_pixel(x, y);
            (0..3)
                .map(|c| u64::from(pixel[c].abs_diff(key[c])))
                .max()
                .unwrap_or(0)
        })
        .sum();
    total as f64 / coords.len() as f64
}

/// Row-major mask of background pixels reachable from the border.
fn flood_background<F>(image: &RgbaImage, seeds: &[(u32, u32)], is_background: F) -> Vec<bool>
where
    F: Fn(&Rgba<u8>) -> bool,
{
    let (width, height) = image.dimensions();
    let index = |x: u32, y: u32| (y as usize) * (width as usize) + x as usize;
    let mut mask = vec![false; (width as usize) * (height as usize)];
    let mut queue = VecDeque::new();

    for &(x, y) in seeds {
        if !mask[index(x, y)] && is_background(image.get_pixel(x, y)) {
            mask[index(x, y)] = true;
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let neighbours = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbours {
            if nx >= width || ny >= height {
                continue;
            }
            let idx = index(nx, ny);
            if !mask[idx] && is_background(image.get_pixel(nx, ny)) {
                mask[idx] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    mask
}
