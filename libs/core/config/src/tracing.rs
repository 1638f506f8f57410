use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Crates whose events the product service emits, in addition to the default level.
const SERVICE_TARGETS: [&str; 4] = ["products_api", "domain_products", "axum_helpers", "tower_http"];

/// Install color-eyre for the binary's error reports.
///
/// Env sections are hidden; repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter directives used when `RUST_LOG` is unset.
///
/// Production keeps everything at `info`. Development raises the product
/// service's own crates to `debug` (payload rejections are logged there) and
/// leaves third-party crates at `info`.
pub fn default_directives(environment: &Environment) -> String {
    let service_level = if environment.is_production() {
        "info"
    } else {
        "debug"
    };

    std::iter::once("info".to_string())
        .chain(
            SERVICE_TARGETS
                .iter()
                .map(|target| format!("{}={}", target, service_level)),
        )
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing for the product service.
///
/// Production writes flattened JSON lines, development writes pretty
/// output with targets. Both carry [`tracing_error::ErrorLayer`] so eyre
/// reports include span traces. `RUST_LOG` replaces [`default_directives`].
///
/// Later calls are no-ops.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(filter);

    let result = if environment.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
    };

    match result {
        Ok(_) => info!(environment = ?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
}
