//! Verity: review trust scoring.
//!
//! Compares a review photo against the product's reference photo with three
//! independent signals (CLIP embedding cosine, DCT perceptual hash, windowed SSIM),
//! fuses them with fixed weights, classifies the review text's sentiment and writes a
//! short verdict.
//!
//! # Pipeline
//!
//! - [`imaging`]: image references and background removal.
//! - [`embedding`]: CLIP image tower and device selection.
//! - [`similarity`]: the three estimators behind [`SimilarityEstimator`].
//! - [`scoring`]: weighted fusion, match flag and confidence tiers.
//! - [`sentiment`]: BERT sequence classifier and label normalization.
//! - [`assessment`]: the overall narrative.
//! - [`analyzer`]: [`ModelContext`] plus the fail-soft [`analyze`] entrypoint.
//!
//! Every model-backed component has a deterministic stub so the crate runs and
//! tests without model files.
//!
//! ```no_run
//! use verity::{ImageAsset, ModelContext, analyze};
//!
//! let context = ModelContext::stub()?;
//! let record = analyze(
//!     &context,
//!     &ImageAsset::from_path("product.jpg"),
//!     &ImageAsset::from_path("review.jpg"),
//!     Some("Exactly as pictured, love it"),
//! );
//! println!("{}", record.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analyzer;
pub mod assessment;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod imaging;
pub mod scoring;
pub mod sentiment;
pub mod similarity;

pub use analyzer::{
    AnalysisRequest, AnalyzerError, ModelContext, ModelInfo, ResultRecord, analyze, analyze_batch,
};
pub use assessment::synthesize;
pub use config::{Config, ConfigError};
pub use embedding::{EmbedderConfig, EmbeddingError, ImageEmbedder};
pub use imaging::{
    BackgroundRemover, BorderKeyMatting, ImageAsset, ImageNormalizer, ImagingError,
    MattingConfig, NormalizedImage,
};
pub use scoring::{ConfidenceLevel, FusedSimilarity, MatchDescription, SimilarityBreakdown};
pub use sentiment::{
    RawPrediction, SentimentClassifier, SentimentConfig, SentimentError, SentimentLabel,
    SentimentResult,
};
pub use similarity::{
    EmbeddingEstimator, EstimatorKind, PerceptualHash, PhashEstimator, SimilarityError,
    SimilarityEstimator, SimilarityScore, SsimEstimator,
};
