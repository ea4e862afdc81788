use anyhow::Context;
use folio::domain::config::LogConfig;
use folio::kernel::prelude::*;
use folio_logger::{LevelFilter, Logger};
use folio_server::{Server, config_source};
use std::path::PathBuf;
use tracing::info;

#[cfg(feature = "profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[folio_runtime::main(memory_efficient)]
async fn main() -> anyhow::Result<()> {
    #[cfg(feature = "profiling")]
    let _profiler = dhat::Profiler::new_heap();

    // Optional first argument: explicit config file
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let cfg: ApiConfig =
        load_config(path.as_deref()).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.log)?;
    info!(source = %config_source(path.as_deref()), config = ?cfg, "Configuration loaded");

    Server::builder().config(cfg).build()?.run().await
}

fn init_logger(cfg: &LogConfig) -> anyhow::Result<Logger> {
    let level: LevelFilter =
        cfg.level.parse().with_context(|| format!("Invalid log level '{}'", cfg.level))?;

    let mut builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level);
    if let Some(filter) = &cfg.filter {
        builder = builder.env_filter(filter);
    }

    let logger = match &cfg.dir {
        Some(dir) => builder.path(dir).json(cfg.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
