use once_cell::sync::OnceCell;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[doc(hidden)]
pub use tracing as __tracing;

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
///
/// Safe to call more than once; only the first call installs anything, and a
/// subscriber installed elsewhere is left in place.
pub fn init_logger() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_names(true)
                    .with_line_number(false)
                    .with_file(false),
            )
            .with(filter)
            .try_init();
    });
}

/// Runs a block and logs how long it took at `debug` level.
///
/// ```
/// let rows = logging::timeit!("SHOW STAGES", { 1 + 1 });
/// assert_eq!(rows, 2);
/// ```
#[macro_export]
macro_rules! timeit {
    ($label:expr, $body:block) => {{
        let __started = ::std::time::Instant::now();
        let __result = $body;
        $crate::__tracing::debug!(
            elapsed_ms = __started.elapsed().as_millis() as u64,
            "{}",
            $label
        );
        __result
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init_logger();
        super::init_logger();
    }

    #[test]
    fn timeit_returns_block_value() {
        let value = crate::timeit!("answer", { 40 + 2 });
        assert_eq!(value, 42);
    }
}
