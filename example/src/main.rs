mod scenarios;
mod sim;

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    scenarios::planet_strip();
    scenarios::fling_deck();
    scenarios::remote_control();
}
