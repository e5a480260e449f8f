pub mod scene;
pub mod shell;
pub mod storage;

pub use scene::{read_scene, write_scene};
pub use shell::{HostShell, RecordingShell};
pub use storage::{FileStore, MemoryStore, SettingsStore, StoreError};
