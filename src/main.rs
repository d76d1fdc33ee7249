mod args;
mod bench;
mod config;
mod entry;
mod error;
mod http;
mod report;
mod shutdown;
mod system;
#[cfg(test)]
mod test_support;
mod transport;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
