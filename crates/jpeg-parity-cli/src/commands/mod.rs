pub mod check;
pub mod corpus;
pub mod dims;
pub mod parity;

use log::LevelFilter;

/// Install the stderr logger. `RUST_LOG` overrides the level picked here.
pub fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
