pub(crate) const DEFAULT_USER_AGENT: &str = concat!("hitbench/", env!("CARGO_PKG_VERSION"));

pub(super) const DEFAULT_BASE_URL: &str = "http://localhost:8080/databases/Bench";
pub(super) const DEFAULT_DATA_FILE: &str = "data.json";
pub(super) const DEFAULT_REQUESTS: &str = "100000";
pub(super) const DEFAULT_CLIENTS: &str = "200";
/// Upper bound (exclusive) of the random document ids used by read runs.
pub(super) const DEFAULT_ID_RANGE: &str = "3594302";
pub(super) const DEFAULT_CONNECT_TIMEOUT: &str = "3s";
pub(super) const DEFAULT_READ_TIMEOUT: &str = "500ms";
pub(super) const DEFAULT_WRITE_TIMEOUT: &str = "500ms";
