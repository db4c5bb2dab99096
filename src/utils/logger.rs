use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const QUIET_DIRECTIVES: &str = "recipe_catalogue=info,tower_http=warn";
const VERBOSE_DIRECTIVES: &str = "recipe_catalogue=debug,tower_http=debug,info";

/// Directives used when `RUST_LOG` is unset. Verbose mode also surfaces the
/// per-request spans emitted by the HTTP trace layer.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVES
    } else {
        QUIET_DIRECTIVES
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Structured output for log collectors.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .json()
                .with_current_span(true),
        )
        .init();
}

/// Span around the serving loop, carrying the listening address and the
/// snapshot location.
pub fn service_span(address: SocketAddr, snapshot: Option<&str>) -> tracing::Span {
    tracing::info_span!(
        "catalogue",
        bind = %address,
        snapshot = %snapshot.unwrap_or("memory"),
    )
}
