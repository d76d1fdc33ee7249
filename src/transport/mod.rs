//! Byte-counting network transport shared by every worker of a run.
mod counters;
mod dial;
mod stream;


pub use counters::{ThroughputCounters, ThroughputSnapshot};
pub use dial::{Endpoint, dial};
pub use stream::CountingStream;
