use crate::{
    assets::{database::AssetDatabase, paths::BakePaths},
    bake::{
        assemble::assemble,
        context::{BakeContext, DispatchStats},
        fallback::FallbackPolicy,
        router::route,
        settings::BakeSettings,
    },
    foundation::error::{BakeError, BakeResult},
    kernel::ComputeBackend,
    scene::{
        manifest::Character,
        material::{Material, MaterialRef},
        rebind::{MaterialMap, finalize, rebind},
        template::{MaterialType, TemplateRegistry},
    },
};

/// One material written by the bake.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BakedMaterial {
    pub source: String,
    pub path: String,
    pub template: MaterialType,
}

/// A material whose bake failed; the rest of the batch carried on.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FailedMaterial {
    pub source: String,
    pub error: String,
}

/// Outcome of one character bake.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct BakeReport {
    pub character: String,
    pub baked: Vec<BakedMaterial>,
    pub passed_through: Vec<String>,
    pub failed: Vec<FailedMaterial>,
    pub dispatches: DispatchStats,
    /// Material slots pointed at a baked material.
    pub slots_rebound: usize,
    pub prefab_path: String,
}

/// Bake every HQ material of `character` and save the rebound clone as a prefab.
///
/// Without a backend every dispatch is skipped and each baked material keeps its source
/// textures. A failing material is logged and reported; it never aborts the batch.
#[tracing::instrument(skip_all, fields(character = %character.name))]
pub fn bake_character(
    character: &Character,
    backend: Option<&mut dyn ComputeBackend>,
    db: &mut dyn AssetDatabase,
    templates: &dyn TemplateRegistry,
    settings: &BakeSettings,
) -> BakeResult<BakeReport> {
    if !character.is_cc3() {
        return Err(BakeError::validation(format!(
            "'{}' is not a CC3 character (generation '{}')",
            character.name, character.generation
        )));
    }
    settings.validate()?;

    let paths = BakePaths::for_model(&character.model_path)?;
    for folder in paths.folders() {
        db.create_folder(folder)?;
    }

    let fallback = FallbackPolicy::new();
    let mut graph = character.graph.clone();
    let mut report = BakeReport {
        character: character.name.clone(),
        ..BakeReport::default()
    };
    let mut map: MaterialMap = Vec::new();

    let backend = backend.map(|b| b as &mut dyn ComputeBackend);
    let (pending, stats) = {
        let mut cx = BakeContext::new(backend, &mut *db, &paths, &fallback, settings);
        for material in graph.unique_materials() {
            let source_name = character.source_name(&material).to_string();
            match bake_material(&mut cx, &material, &source_name, templates, settings) {
                Ok(Some(baked)) => {
                    report.baked.push(BakedMaterial {
                        source: source_name,
                        path: baked.1.asset_path.clone().unwrap_or_default(),
                        template: baked.0,
                    });
                    map.push((material, baked.1));
                }
                Ok(None) => report.passed_through.push(source_name),
                Err(e) => {
                    tracing::error!(material = %source_name, error = %e, "material bake failed");
                    report.failed.push(FailedMaterial {
                        source: source_name,
                        error: e.to_string(),
                    });
                }
            }
        }
        (cx.take_pending_reimports(), cx.stats())
    };
    report.dispatches = stats;

    db.save_assets()?;
    if !pending.is_empty() {
        db.reimport(&pending)?;
    }

    report.slots_rebound = rebind(&mut graph, &map);
    report.prefab_path = finalize(graph, db, &paths.prefab_path())?;

    tracing::info!(
        baked = report.baked.len(),
        passed_through = report.passed_through.len(),
        failed = report.failed.len(),
        dispatched = stats.dispatched,
        skipped = stats.skipped,
        "character baked"
    );
    Ok(report)
}

/// Route one material and assemble its baked counterpart.
fn bake_material(
    cx: &mut BakeContext<'_>,
    material: &Material,
    source_name: &str,
    templates: &dyn TemplateRegistry,
    settings: &BakeSettings,
) -> BakeResult<Option<(MaterialType, MaterialRef)>> {
    let Some(output) = route(cx, material, source_name, settings)? else {
        return Ok(None);
    };
    let template = output.template;
    let baked = assemble(cx, output, material, source_name, templates, settings)?;
    Ok(Some((template, baked)))
}
