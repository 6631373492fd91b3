//! Fail-soft orchestration of one review analysis.
//!
//! [`analyze`] normalizes both images, runs the three estimators, fuses their
//! scores, classifies the review text and writes the narrative. It never returns
//! an error and never panics. A single failing estimator scores `0.0`; when all of
//! them fail, or any stage panics, the caller gets [`ResultRecord::fallback`].

pub mod context;
pub mod error;
pub mod record;


pub use context::{FEATURES, ModelContext, ModelInfo};
pub use error::AnalyzerError;
pub use record::{Confidence, FAILED_DESCRIPTION, ImageSimilarity, ResultRecord};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, warn};

use crate::assessment::synthesize;
use crate::imaging::ImageAsset;
use crate::scoring::SimilarityBreakdown;
use crate::similarity::{
    EmbeddingEstimator, PhashEstimator, SimilarityEstimator, SimilarityScore, SsimEstimator,
};

/// One item of [`analyze_batch`].
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub product: ImageAsset,
    pub review: ImageAsset,
    pub review_text: Option<String>,
}

impl AnalysisRequest {
    pub fn new(product: ImageAsset, review: ImageAsset) -> Self {
        Self {
            product,
            review,
            review_text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.review_text = Some(text.into());
        self
    }
}

/// Scores a review image against its product image, plus optional review text.
pub fn analyze(
    context: &ModelContext,
    product: &ImageAsset,
    review: &ImageAsset,
    review_text: Option<&str>,
) -> ResultRecord {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        run_pipeline(context, product, review, review_text)
    }));

    match outcome {
        Ok(Ok(record)) => record,
        Ok(Err(e)) => {
            error!(
                product = %product.origin(),
                review = %review.origin(),
                error = %e,
                "Analysis failed, returning fallback record"
            );
            ResultRecord::fallback(e.to_string())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(
                product = %product.origin(),
                review = %review.origin(),
                panic = %message,
                "Analysis panicked, returning fallback record"
            );
            ResultRecord::fallback(format!("analysis panicked: {message}"))
        }
    }
}

/// Sequential [`analyze`] over many requests; each item fails independently.
pub fn analyze_batch(context: &ModelContext, requests: &[AnalysisRequest]) -> Vec<ResultRecord> {
    requests
        .iter()
        .map(|request| {
            analyze(
                context,
                &request.product,
                &request.review,
                request.review_text.as_deref(),
            )
        })
        .collect()
}

fn run_pipeline(
    context: &ModelContext,
    product: &ImageAsset,
    review: &ImageAsset,
    review_text: Option<&str>,
) -> Result<ResultRecord, AnalyzerError> {
    let normalizer = context.normalizer();
    let left = normalizer.normalize(product);
    let right = normalizer.normalize(review);

    let embedding = EmbeddingEstimator::new(context.embedder());
    let estimators: [&dyn SimilarityEstimator; 3] = [&embedding, &PhashEstimator, &SsimEstimator];

    let mut scores = [SimilarityScore::ZERO; 3];
    let mut failures = Vec::new();

    for (slot, estimator) in scores.iter_mut().zip(estimators) {
        match estimator.estimate(&left, &right) {
            Ok(score) => *slot = score,
            Err(e) => {
                warn!(estimator = %estimator.kind(), error = %e, "Estimator failed, scoring 0.0");
                failures.push(format!("{}: {}", estimator.kind(), e));
            }
        }
    }

    if failures.len() == scores.len() {
        return Err(AnalyzerError::PipelineFailed {
            reason: failures.join("; "),
        });
    }

    let [embedding, phash, ssim] = scores;
    let breakdown = SimilarityBreakdown::new(embedding, phash, ssim);
    let fused = breakdown.fuse();

    let sentiment = review_text
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| context.classifier().classify(text));

    let narrative = synthesize(fused, fused.confidence_score(), sentiment.as_ref());

    debug!(
        embedding = embedding.value(),
        phash = phash.value(),
        ssim = ssim.value(),
        fused = fused.value(),
        sentiment = ?sentiment.as_ref().map(|s| s.label),
        "Analysis complete"
    );

    Ok(ResultRecord::new(breakdown, fused, sentiment, narrative))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
