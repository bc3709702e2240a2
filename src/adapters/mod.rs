pub mod embedded_scaffold;
pub mod local_filesystem;
pub mod system_clock;

pub use embedded_scaffold::EmbeddedScaffold;
pub use local_filesystem::LocalFilesystem;
pub use system_clock::SystemClock;
