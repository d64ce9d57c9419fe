use anyhow::Result;
use ponder::client::{ChatPipeline, ClientConfig};
use ponder::ui::PonderApp;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ponder=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ponder chat widget");

    let pipeline = ChatPipeline::new(ClientConfig::from_env());
    let chat = pipeline.start_worker()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([320.0, 560.0])
            .with_min_inner_size([280.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ponder",
        options,
        Box::new(|cc| Ok(Box::new(PonderApp::new(cc, chat)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
