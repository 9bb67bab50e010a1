//! stderr logging. stdout carries the protobuf response in plugin mode.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "APIDOC_LOG";

/// Filter directive for a `-v` count; `None` defers to `APIDOC_LOG`.
fn verbosity_directive(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

pub fn init(verbosity: u8) {
    let filter = match verbosity_directive(verbosity) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_directive(0), None);
        assert_eq!(verbosity_directive(1), Some("debug"));
        assert_eq!(verbosity_directive(2), Some("trace"));
        assert_eq!(verbosity_directive(9), Some("trace"));
    }
}
