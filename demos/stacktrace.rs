//! Prints one enriched error in each rendering.
//!
//! Run with `RUST_LOG=debug` to also see the structured log events.

use errs::{Error, ResultExt};
use tracing_subscriber::EnvFilter;

fn something(value: &str) -> Result<(), Error> {
    Err(Error::new("somthing error").with("key", value))
}

fn handler() -> Result<(), Error> {
    something("hoge").wrap_err_msg("handle request")
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = handler() {
        println!("{err}");
        println!("{err:#}");
        match err.to_json() {
            Ok(json) => println!("{json}"),
            Err(encode_err) => eprintln!("encode failed: {encode_err}"),
        }
        err.report();
    }
}
