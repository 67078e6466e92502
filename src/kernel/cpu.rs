use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    foundation::{
        error::{BakeError, BakeResult},
        math::{Rgba, to_u8},
    },
    kernel::{
        backend::{ComputeBackend, KernelId},
        library::{KERNELS, KernelEntry},
        params::{Bindings, KernelParams, ThreadGroups},
    },
};

/// CPU backend options.
#[derive(Clone, Debug, Default)]
pub struct CpuBackendOpts {
    /// Worker threads for the dispatch pool; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl CpuBackendOpts {
    /// Pool for kernel dispatch, apart from rayon's global pool. Workers are named
    /// `cc3-bake-kernel-<n>`.
    fn kernel_pool(&self) -> BakeResult<rayon::ThreadPool> {
        let builder = match self.threads {
            Some(0) => {
                return Err(BakeError::validation(
                    "cpu backend needs at least one kernel thread",
                ));
            }
            Some(n) => rayon::ThreadPoolBuilder::new().num_threads(n),
            None => rayon::ThreadPoolBuilder::new(),
        };
        builder
            .thread_name(|i| format!("cc3-bake-kernel-{i}"))
            .build()
            .map_err(|e| BakeError::backend_unavailable(format!("cpu kernel pool: {e}")))
    }
}

/// Evaluates the kernel library per texel on a dedicated rayon pool.
///
/// Texel `(x, y)` is shaded at its centre with `v` pointing up, so row 0 of the output is the
/// top of UV space.
pub struct CpuBackend {
    pool: rayon::ThreadPool,
    kernels: &'static [KernelEntry],
}

impl CpuBackend {
    pub fn new(opts: CpuBackendOpts) -> BakeResult<Self> {
        Ok(Self {
            pool: opts.kernel_pool()?,
            kernels: KERNELS,
        })
    }

    /// Names of every kernel this backend can run.
    pub fn kernel_names() -> impl Iterator<Item = &'static str> {
        KERNELS.iter().map(|k| k.name)
    }
}

impl ComputeBackend for CpuBackend {
    fn find_kernel(&self, name: &str) -> Option<KernelId> {
        self.kernels
            .iter()
            .position(|k| k.name == name)
            .map(KernelId)
    }

    #[tracing::instrument(skip(self, params), fields(kernel = tracing::field::Empty))]
    fn dispatch(
        &mut self,
        kernel: KernelId,
        params: &KernelParams,
        groups: ThreadGroups,
    ) -> BakeResult<RgbaImage> {
        let entry = self
            .kernels
            .get(kernel.0)
            .ok_or_else(|| BakeError::backend_unavailable(format!("unknown kernel id {}", kernel.0)))?;
        tracing::Span::current().record("kernel", entry.name);

        let extent = groups.extent()?;
        let shader = (entry.build)(&Bindings::new(entry.name, params))?;

        let (w, h) = (extent.width, extent.height);
        let mut out = RgbaImage::new(w, h);
        let row_len = w as usize * 4;
        let buf: &mut [u8] = &mut out;
        self.pool.install(|| {
            buf.par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| shade_row(&*shader, row, y as u32, w, h));
        });
        Ok(out)
    }
}

fn shade_row(shader: &(dyn Fn(f32, f32) -> Rgba + Send + Sync), row: &mut [u8], y: u32, w: u32, h: u32) {
    let v = 1.0 - (y as f32 + 0.5) / h as f32;
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let u = (x as f32 + 0.5) / w as f32;
        let c = shader(u, v);
        for (dst, src) in px.iter_mut().zip(c) {
            *dst = to_u8(src);
        }
    }
    debug_assert_eq!(row.len(), w as usize * 4);
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/cpu.rs"]
mod tests;
