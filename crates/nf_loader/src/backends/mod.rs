pub mod file;
pub mod http;
pub mod memory;

pub use file::FileSource;
pub use http::HttpSource;
pub use memory::MemorySource;
