use tracing_subscriber::EnvFilter;

/// Initialise logging at `info`. With `debug` the default becomes `debug`
/// and `RUST_LOG` may override it; without it `RUST_LOG` is ignored so a
/// stray environment variable cannot flood the terminal every frame.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    // A global subscriber may already be installed; keep it and say so.
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("logging not initialised: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_keeps_running() {
        init(false);
        init(true);
        tracing::info!("still logging");
    }
}
