use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("failed to decode image from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: image::ImageError,
    },

    #[error("image is too small to normalize: {width}x{height}")]
    TooSmall { width: u32, height: u32 },

    #[error("invalid matting configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("matte tolerance '{value}' is not an integer in 0-255: {source}")]
    InvalidTolerance {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
