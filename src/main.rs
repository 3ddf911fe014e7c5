use anyhow::Result;
use typed_logger::config::load_settings;
use typed_logger::logging::init_tracing;
use typed_logger::{Logger, LoggerRegistry, log_debug, log_error, log_info, log_warning};

struct TileFetcher;
struct CacheJanitor;

fn main() -> Result<()> {
    let settings = load_settings()?;
    init_tracing(&settings)?;

    tracing::info!("🚀 Starting typed-logger demo");
    tracing::debug!(
        "Config: filter={}, format={:?}",
        settings.filter,
        settings.format
    );

    let fetcher = typed_logger::for_type::<TileFetcher>()?;
    let janitor = typed_logger::for_type::<CacheJanitor>()?;

    if fetcher.is_debug_enabled() {
        log_debug!(fetcher, "debug output enabled for {}", fetcher.key().short_name());
    }
    log_info!(fetcher, "fetched {} tiles from {}", 12, "provider-a");
    log_warning!(janitor, "cache at {}% of budget", 91);
    log_error!(janitor, "could not evict {}", "tile 7");

    let cause = std::io::Error::other("permission denied");
    log_error!(janitor, cause = &cause, "failed to delete {}", "/tmp/tile-7.dds");

    // Cached: no second backend construction
    let _ = typed_logger::for_type::<TileFetcher>()?;

    LoggerRegistry::global().log_stats();
    tracing::info!("✅ Demo complete");
    Ok(())
}
