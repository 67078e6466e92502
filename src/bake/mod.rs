//! The bake engine: routes each material to its recipe, runs the kernels and writes the baked
//! material set.

pub mod assemble;
pub mod category;
pub mod context;
pub mod fallback;
pub mod guard;
pub mod maps;
pub mod props;
pub mod recipes;
pub mod router;
pub mod session;
pub mod settings;
pub mod target;

pub use category::MaterialCategory;
pub use context::{BakeContext, DispatchStats};
pub use fallback::{FallbackKind, FallbackPolicy};
pub use guard::{all_present, compose_guarded};
pub use recipes::{BakedMapSet, RecipeOutput};
pub use session::{BakeReport, BakedMaterial, FailedMaterial, bake_character};
pub use settings::BakeSettings;
pub use target::{BakeTarget, MapKind, SizeRule, TargetAllocator, TargetFlags};
