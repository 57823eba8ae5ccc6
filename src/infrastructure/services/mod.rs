mod console;
mod probe_network;
mod storage;

pub use console::ConsoleSink;
pub use probe_network::{StackProbeNetwork, TcpConnection};
pub use storage::{REGION_SIZE, init_boot_record};
