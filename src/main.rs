//! Patoweb main entry point

use clap::Parser;
use patoweb_api::start_server;
use patoweb_config::Config;
use patoweb_core::Ledger;
use patoweb_loader::CsvTableLoader;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "patoweb")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web dashboard for the patota's shared finances", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match Config::load(args.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            // A missing config file is fine for a first run; bad values are not
            if args.config.exists() {
                eprintln!("[ERROR] Failed to load {}: {}", args.config.display(), e);
                std::process::exit(1);
            }
            Config::default()
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.clone()),
    )
    .init();

    log::info!(
        "Config loaded: data path={}, flow file={}, TTL={}s",
        config.data.path.display(),
        config.data.flow_file,
        config.data.cache_ttl_secs
    );

    let rt = Runtime::new()?;

    rt.block_on(async {
        let loader = Arc::new(CsvTableLoader::default());
        let ledger = Arc::new(Ledger::new(config.clone(), loader));

        let flow_path = config.flow_path();
        if flow_path.exists() {
            match ledger.load().await {
                Ok(_) => log::info!("Initial snapshot loaded"),
                Err(e) => log::error!("Initial snapshot failed: {}", e),
            }
        } else {
            log::warn!(
                "Cash-flow table not found at {}; dashboard will show no data",
                flow_path.display()
            );
        }

        start_server(config, ledger).await
    });

    Ok(())
}
