use image::RgbaImage;

use crate::{
    foundation::error::BakeResult,
    kernel::{
        cpu::{CpuBackend, CpuBackendOpts},
        params::{KernelParams, ThreadGroups},
    },
};

/// Opaque handle returned by [`ComputeBackend::find_kernel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KernelId(pub(crate) usize);

/// A device that can run named 2D image kernels.
///
/// Dispatch is synchronous: the returned image is fully written when the call returns.
pub trait ComputeBackend {
    /// Look a kernel up by name; `None` means this backend cannot run it.
    fn find_kernel(&self, name: &str) -> Option<KernelId>;

    /// Run `kernel` once per thread group and read the result back.
    fn dispatch(
        &mut self,
        kernel: KernelId,
        params: &KernelParams,
        groups: ThreadGroups,
    ) -> BakeResult<RgbaImage>;
}

/// Available backend kinds.
///
/// - `Cpu` is always available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Data-parallel CPU backend powered by `rayon`.
    Cpu,
}

/// Create a compute backend implementation.
pub fn create_backend(
    kind: BackendKind,
    opts: CpuBackendOpts,
) -> BakeResult<Box<dyn ComputeBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(CpuBackend::new(opts)?)),
    }
}
