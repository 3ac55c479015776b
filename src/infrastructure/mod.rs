pub mod host_page;
pub mod memory_page;

pub use host_page::{mounts, HostPage};
pub use memory_page::MemoryPage;
