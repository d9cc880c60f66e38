// CLI entry point for the photo flow: recognize the text in an image and
// translate it into the requested language.
//
// Run with: cargo run --release -- <image_path> [target-language]

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use lingosnap::{
    Config, GtxTranslator, LanguageTag, PhotoPipeline, PhotoWorkspace, VisionClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::new().context("Failed to load configuration")?;

    // Initialize logging
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lingosnap=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Get image path and target language from args
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: lingosnap <image_path> [target-language]");
        std::process::exit(2);
    }
    let image_path = &args[1];
    let target = LanguageTag::new(args.get(2).map(String::as_str).unwrap_or("en"));

    let image = image::open(image_path)
        .with_context(|| format!("Failed to open image: {image_path}"))?;
    info!("Image dimensions: {}x{}", image.width(), image.height());

    let recognizer = Arc::new(VisionClient::new(&config.ocr)?);
    let translator = Arc::new(GtxTranslator::new(&config.translate)?);
    let pipeline = Arc::new(PhotoPipeline::new(
        recognizer,
        translator,
        config.encode.jpeg_quality,
    ));

    let mut workspace = PhotoWorkspace::new(pipeline);
    workspace.pick_image(image);

    match workspace.translate(&target).await {
        Ok(output) => {
            if output.translated {
                info!("Translated into {}", target);
            } else {
                info!("Showing recognized text unchanged");
            }
            println!("{}", output.text);
            Ok(())
        }
        Err(err) => {
            eprintln!("Oops... {}", err.alert_text());
            std::process::exit(1);
        }
    }
}
