mod fixed_clock;
mod memory_filesystem;

pub use fixed_clock::FixedClock;
pub use memory_filesystem::MemoryFilesystem;
