pub mod backend;
pub mod cpu;
pub mod library;
pub mod params;
pub mod recording;

pub use backend::{BackendKind, ComputeBackend, KernelId, create_backend};
pub use cpu::{CpuBackend, CpuBackendOpts};
pub use params::{KernelParams, ThreadGroups};
pub use recording::{DispatchRecord, RecordingBackend};
