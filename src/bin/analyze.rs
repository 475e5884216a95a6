//! Command-line front end: previews a leaf image and runs it through the
//! local relay, printing the Arabic diagnosis.

use std::path::PathBuf;

use clap::Parser;

use plant_service_rs::client::{AnalyzeControl, ClassifyClient};
use plant_service_rs::preview::{selected_caption, PreviewPane, PreviewState};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the leaf image
    image: PathBuf,

    /// Base URL of the running relay server
    #[arg(long, default_value = "http://localhost:3000")]
    relay: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let (pane, mut rx) = PreviewPane::new();
    pane.select(Some(args.image));

    let (file_name, image) = {
        let state = rx.wait_for(PreviewState::is_settled).await?.clone();
        match state {
            PreviewState::Ready { file_name, image } => (file_name, image),
            PreviewState::Failed { file_name, error } => {
                eprintln!("تعذر قراءة {file_name}: {error}");
                std::process::exit(1);
            }
            _ => unreachable!("wait_for only yields settled states"),
        }
    };
    println!("{}", selected_caption(&file_name));

    let control = AnalyzeControl::new();
    let _guard = control
        .try_begin()
        .ok_or("analysis already in flight")?;

    let client = ClassifyClient::new(args.relay);
    let view = client.analyze(image, &file_name).await;

    println!("التشخيص: {}", view.diagnosis);
    println!("نسبة الثقة: {}", view.confidence);
    println!("العلاج المقترح: {}", view.treatment);
    Ok(())
}
