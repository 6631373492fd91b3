//! `verity` command-line entrypoint.
//!
//! ```text
//! verity <product-image> <review-image> [review text...]
//! verity --info
//! ```

use anyhow::{Context, bail};
use mimalloc::MiMalloc;

use verity::analyzer::{ModelContext, analyze};
use verity::config::Config;
use verity::imaging::ImageAsset;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: verity <product-image> <review-image> [review text...]\n       verity --info";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        clip_model = ?config.clip_model_path,
        sentiment_model = ?config.sentiment_model_path,
        remove_background = config.remove_background,
        "Verity starting"
    );

    let context = ModelContext::load(&config).context("failed to load models")?;

    if args.first().is_some_and(|arg| arg == "--info") {
        println!("{}", serde_json::to_string_pretty(&context.info())?);
        return Ok(());
    }

    let [product, review, text @ ..] = args.as_slice() else {
        bail!("{USAGE}");
    };

    let review_text = text.join(" ");
    let record = analyze(
        &context,
        &ImageAsset::from_path(product),
        &ImageAsset::from_path(review),
        Some(review_text.as_str()),
    );

    println!("{}", record.to_json_pretty()?);

    if record.is_fallback() {
        std::process::exit(1);
    }

    Ok(())
}
