use std::collections::{BTreeMap, BTreeSet};

use image::{Rgba, RgbaImage};

use crate::{
    foundation::error::{BakeError, BakeResult},
    kernel::{
        backend::{ComputeBackend, KernelId},
        cpu::CpuBackend,
        params::{KernelParams, ThreadGroups},
    },
};

/// One dispatch as seen by [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchRecord {
    pub kernel: String,
    /// Bound texture name per parameter.
    pub textures: BTreeMap<String, String>,
    pub floats: BTreeMap<String, f32>,
    pub vectors: BTreeMap<String, [f32; 4]>,
    pub groups: ThreadGroups,
}

impl DispatchRecord {
    pub fn texture(&self, name: &str) -> Option<&str> {
        self.textures.get(name).map(String::as_str)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }
}

/// Backend that records every dispatch and returns a flat image instead of shading.
///
/// Knows the same kernel names as [`CpuBackend`]; individual kernels can be withheld to
/// exercise the unavailable-kernel path.
#[derive(Debug)]
pub struct RecordingBackend {
    names: Vec<&'static str>,
    withheld: BTreeSet<String>,
    fill: [u8; 4],
    dispatches: Vec<DispatchRecord>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            names: CpuBackend::kernel_names().collect(),
            withheld: BTreeSet::new(),
            fill: [255, 255, 255, 255],
            dispatches: Vec::new(),
        }
    }

    pub fn with_fill(mut self, fill: [u8; 4]) -> Self {
        self.fill = fill;
        self
    }

    /// Pretend `name` does not exist on this device.
    pub fn without_kernel(mut self, name: &str) -> Self {
        self.withheld.insert(name.to_string());
        self
    }

    /// Pretend no kernel exists at all.
    pub fn without_any_kernel(mut self) -> Self {
        self.withheld
            .extend(self.names.iter().map(|n| (*n).to_string()));
        self
    }

    pub fn dispatches(&self) -> &[DispatchRecord] {
        &self.dispatches
    }

    pub fn kernel_sequence(&self) -> Vec<&str> {
        self.dispatches.iter().map(|d| d.kernel.as_str()).collect()
    }

    pub fn find(&self, kernel: &str) -> Option<&DispatchRecord> {
        self.dispatches.iter().find(|d| d.kernel == kernel)
    }
}

impl ComputeBackend for RecordingBackend {
    fn find_kernel(&self, name: &str) -> Option<KernelId> {
        if self.withheld.contains(name) {
            return None;
        }
        self.names.iter().position(|n| *n == name).map(KernelId)
    }

    fn dispatch(
        &mut self,
        kernel: KernelId,
        params: &KernelParams,
        groups: ThreadGroups,
    ) -> BakeResult<RgbaImage> {
        let name = self
            .names
            .get(kernel.0)
            .ok_or_else(|| BakeError::backend_unavailable(format!("unknown kernel id {}", kernel.0)))?;
        let extent = groups.extent()?;
        self.dispatches.push(DispatchRecord {
            kernel: (*name).to_string(),
            textures: params
                .textures()
                .map(|(k, t)| (k.to_string(), t.name().to_string()))
                .collect(),
            floats: params.floats().map(|(k, v)| (k.to_string(), v)).collect(),
            vectors: params.vectors().map(|(k, v)| (k.to_string(), v)).collect(),
            groups,
        });
        Ok(RgbaImage::from_pixel(extent.width, extent.height, Rgba(self.fill)))
    }
}
