use clap::Parser;
use std::sync::Arc;

use ezupload::config::{self, AppState, Config};
use ezupload::{logger, server};

/// Intentionally vulnerable upload endpoint (CTF exercise)
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file path without extension
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,

    /// Directory that receives created and uploaded files (overrides storage.work_dir)
    #[arg(short, long)]
    work_dir: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut cfg = Config::load_from(&cli.config)?;
    if let Some(work_dir) = cli.work_dir {
        cfg.storage.work_dir = work_dir;
    }

    if cli.print_config {
        print!("{}", cfg.to_toml()?);
        return Ok(());
    }

    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(&cfg).map_err(|e| {
        format!("Invalid storage.work_dir '{}': {e}", cfg.storage.work_dir)
    })?);

    let listener = server::create_reusable_listener(addr)?;
    logger::log_server_start(&addr, &state.work_dir, &cfg);

    server::start_signal_handler(Arc::clone(&state))?;

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state))
        .await
}
