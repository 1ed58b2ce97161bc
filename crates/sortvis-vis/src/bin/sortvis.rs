//! Selection Sort Visualizer
//!
//! Serve the viewer page, or replay one run to the console with `--headless`.

use sortvis_vis::{ConsoleRenderer, RunOutcome, VisConfig, VisServer, Visualizer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sortvis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let headless = args.iter().any(|a| a == "--headless");
    let config = VisConfig::from_env()?.with_args(&args)?;

    println!("Selection Sort Visualizer");
    println!("=========================");
    println!();

    if headless {
        let vis = Visualizer::new(config, ConsoleRenderer::new(true))?;
        println!("Array: [{}]", sortvis_trace::join_values(&vis.array()));
        println!();

        if let RunOutcome::Completed(summary) = vis.run().await? {
            println!();
            println!("Run complete:");
            println!("  Steps: {}", summary.steps);
            println!("  Comparisons: {}", summary.comparisons);
            println!("  Swaps: {}", summary.swaps);
        }
        return Ok(());
    }

    println!("Starting visualization server on http://localhost:{}", config.port);
    println!("Open in browser to watch selection sort step by step.");
    println!();

    let server = VisServer::new(config)?;
    server.serve().await?;

    Ok(())
}
