//! Image embedding + model utilities.
//!
//! - [`clip`] provides unit-normalized image embeddings.
//! - [`device`] picks the compute device shared with [`crate::sentiment`].

/// CLIP image embedder.
pub mod clip;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;

pub use clip::{CLIP_WEIGHTS_FILE, EmbedderConfig, ImageEmbedder};
pub use device::{device_label, select_device};
pub use error::EmbeddingError;
