use crate::{
    assets::{database::AssetDatabase, paths::BakePaths, texture::TextureRef},
    bake::{
        fallback::{FallbackKind, FallbackPolicy},
        settings::BakeSettings,
        target::{BakeTarget, SizeRule, TargetAllocator, TargetFlags},
    },
    foundation::error::{BakeError, BakeResult},
    kernel::{ComputeBackend, KernelParams, ThreadGroups},
};

/// Dispatch counters for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DispatchStats {
    pub dispatched: usize,
    /// Dispatches skipped because the backend or the kernel was unavailable.
    pub skipped: usize,
}

/// Everything a recipe needs to turn inputs into persisted textures.
///
/// Owns no resources: the backend, asset database and fallback policy belong to the session.
pub struct BakeContext<'a> {
    backend: Option<&'a mut dyn ComputeBackend>,
    db: &'a mut dyn AssetDatabase,
    paths: &'a BakePaths,
    fallback: &'a FallbackPolicy,
    allocator: TargetAllocator,
    stats: DispatchStats,
    pending_reimports: Vec<String>,
}

impl<'a> BakeContext<'a> {
    pub fn new(
        backend: Option<&'a mut dyn ComputeBackend>,
        db: &'a mut dyn AssetDatabase,
        paths: &'a BakePaths,
        fallback: &'a FallbackPolicy,
        settings: &BakeSettings,
    ) -> Self {
        Self {
            backend,
            db,
            paths,
            fallback,
            allocator: TargetAllocator::new(settings),
            stats: DispatchStats::default(),
            pending_reimports: Vec::new(),
        }
    }

    pub fn paths(&self) -> &BakePaths {
        self.paths
    }

    pub fn db(&mut self) -> &mut dyn AssetDatabase {
        &mut *self.db
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn resolve(&self, texture: Option<&TextureRef>, kind: FallbackKind) -> TextureRef {
        self.fallback.resolve(texture, kind)
    }

    pub fn target(
        &self,
        name: String,
        rule: SizeRule,
        inputs: &[Option<&TextureRef>],
        flags: TargetFlags,
    ) -> BakeTarget {
        self.allocator.allocate(name, rule, inputs, flags)
    }

    /// Queue an asset for the reimport pass that follows the material batch.
    pub fn defer_reimport(&mut self, path: String) {
        if !self.pending_reimports.contains(&path) {
            self.pending_reimports.push(path);
        }
    }

    pub fn take_pending_reimports(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_reimports)
    }

    /// Dispatch `kernel` into `target` and persist the result.
    ///
    /// `Ok(None)` means the bake was skipped because no backend or kernel is available; the
    /// caller keeps the original texture for that slot.
    pub fn run(
        &mut self,
        kernel: &str,
        target: BakeTarget,
        params: &KernelParams,
    ) -> BakeResult<Option<TextureRef>> {
        match self.dispatch(kernel, target, params) {
            Ok(t) => {
                self.stats.dispatched += 1;
                Ok(Some(t))
            }
            Err(e) if e.is_backend_unavailable() => {
                tracing::warn!(kernel, error = %e, "bake skipped, keeping original texture");
                self.stats.skipped += 1;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn dispatch(
        &mut self,
        kernel: &str,
        target: BakeTarget,
        params: &KernelParams,
    ) -> BakeResult<TextureRef> {
        let backend = self
            .backend
            .as_deref_mut()
            .ok_or_else(|| BakeError::backend_unavailable("no compute backend"))?;
        let id = backend
            .find_kernel(kernel)
            .ok_or_else(|| BakeError::backend_unavailable(format!("kernel '{kernel}' not found")))?;

        tracing::debug!(
            kernel,
            texture = %target.name,
            width = target.extent.width,
            height = target.extent.height,
            "dispatch"
        );
        let pixels = backend.dispatch(id, params, ThreadGroups::for_extent(target.extent))?;
        self.allocator
            .finalize(target, &pixels, self.paths, &mut *self.db)
    }
}
