use anyhow::Context;
use highlight_pick::{HighlightApp, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,highlight_pick=info"),
    )
    .init();

    let config = ViewerConfig::from_env();
    log::info!(
        "starting with {} objects per kind (seed: {:?})",
        config.object_count,
        config.seed
    );

    let app = HighlightApp::new(config).context("failed to set up the viewer")?;
    app.run().context("viewer exited with an error")
}
