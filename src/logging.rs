use tracing_subscriber::{fmt, EnvFilter};

/// Install a stderr `fmt` subscriber. `RUST_LOG` takes precedence over
/// `default_level`. Calling it again once a subscriber is set does nothing.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = result {
        let msg = e.to_string();
        if !msg.contains("already") {
            eprintln!("failed to initialize tracing: {e}");
        }
    }
}
