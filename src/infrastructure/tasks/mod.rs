pub(crate) mod http_probe;
pub(crate) mod indicator;
pub(crate) mod network;

pub use http_probe::http_probe_task;
pub use indicator::run_indicator;
pub use network::{network_runner_task, wifi_connection_task};
