use std::sync::Arc;

use ggb_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), ggb_core::Error> {
    ggb_core::logging::init("ggb")?;

    let cfg = Arc::new(Config::load()?);

    ggb_telegram::router::serve(cfg)
        .await
        .map_err(|e| ggb_core::Error::External(format!("webhook server failed: {e}")))?;

    Ok(())
}
