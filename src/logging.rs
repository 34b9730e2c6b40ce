use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes tracing for all three binaries. JSON lines on stdout, which
/// the hosting platform's log capture picks up as-is.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(std::io::stdout))
        .init();
}
