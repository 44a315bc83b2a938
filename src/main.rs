use std::env;
use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use homematch::config::MatchConfig;

const CONFIG_FILE: &str = "homematch.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::builder()
        .with_default_directive("homematch=info".parse()?)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = if Path::new(CONFIG_FILE).exists() {
        info!(path = CONFIG_FILE, "loading configuration");
        MatchConfig::load(CONFIG_FILE)?
    } else {
        MatchConfig::default()
    };
    if let Some(input) = env::args().nth(1) {
        config = config.with_input(input);
    }

    match homematch::run_file(&config) {
        Ok(report) => {
            println!("{}", report);
            Ok(())
        }
        Err(err) => {
            error!(%err, "run failed");
            Err(err.into())
        }
    }
}
