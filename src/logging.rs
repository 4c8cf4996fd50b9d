use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "rust_slideshow=info,slideshow=info,winit=warn",
        1 => "rust_slideshow=debug,slideshow=debug,winit=warn",
        _ => "rust_slideshow=trace,slideshow=trace,winit=info",
    }
}

/// Install the global subscriber once. `RUST_LOG` wins over `verbosity`.
pub fn init(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_level(true)
            .init();
    });
}
