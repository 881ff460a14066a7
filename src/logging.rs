//! Diagnostic logging to stderr.

use tracing_subscriber::{EnvFilter, fmt};

/// Maps the `-v`/`-q` counters to a level for this crate.
///
/// Default is WARN so the terminal map and list stay readable.
/// - `-v` => INFO
/// - `-vv` => DEBUG
/// - `-vvv` => TRACE
/// - `-q` => ERROR
fn level(verbose: u8, quiet: u8) -> &'static str {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-1 => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        3..=i16::MAX => "trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the counters.
pub fn init_logging(verbose: u8, quiet: u8) {
    let level = level(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,mapty={level}")));

    let show_src = matches!(level, "debug" | "trace");

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_shift_level() {
        assert_eq!(level(0, 0), "warn");
        assert_eq!(level(2, 0), "debug");
        assert_eq!(level(9, 0), "trace");
        assert_eq!(level(0, 3), "error");
        assert_eq!(level(1, 1), "warn");
    }
}
