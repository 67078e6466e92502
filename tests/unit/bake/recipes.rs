use std::{path::PathBuf, sync::Arc};

use super::*;
use crate::{
    assets::{fs::FsAssetDatabase, paths::BakePaths, texture::Texture},
    bake::{
        context::BakeContext, fallback::FallbackPolicy, props::Props, settings::BakeSettings,
    },
    foundation::core::Extent,
    kernel::{ComputeBackend, RecordingBackend, library as k},
};

struct Rig {
    root: PathBuf,
    db: FsAssetDatabase,
    paths: BakePaths,
    fallback: FallbackPolicy,
    settings: BakeSettings,
}

impl Rig {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "cc3bake_recipes_{name}_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&root).unwrap();
        Self {
            db: FsAssetDatabase::open(&root).unwrap(),
            root,
            paths: BakePaths::for_model("Assets/Characters/Hero.fbx").unwrap(),
            fallback: FallbackPolicy::new(),
            settings: BakeSettings::default(),
        }
    }

    fn run<T>(
        &mut self,
        backend: &mut RecordingBackend,
        f: impl FnOnce(&mut BakeContext<'_>) -> T,
    ) -> T {
        let backend = Some(backend as &mut dyn ComputeBackend);
        let mut cx = BakeContext::new(
            backend,
            &mut self.db,
            &self.paths,
            &self.fallback,
            &self.settings,
        );
        f(&mut cx)
    }
}

impl Drop for Rig {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.root).ok();
    }
}

fn tex(name: &str, size: u32) -> TextureRef {
    Texture::solid(name, Extent::square(size), [200, 150, 100, 255]).into_shared()
}

fn skin_material(textures: &[(&str, &TextureRef)]) -> Material {
    let mut m = Material::new("Std_Skin_Body", "Reallusion/RL_SkinShaderVariants");
    for (slot, t) in textures {
        m.set_texture(slot, Some(Arc::clone(t)));
    }
    m
}

#[test]
fn non_head_skin_with_plain_mask_uses_the_generic_mask_kernel() {
    let mut rig = Rig::new("plain_mask");
    let mut backend = RecordingBackend::new();
    let mask = tex("body_mask", 16);
    let m = skin_material(&[("_MaskMap", &mask)]);

    let out = rig
        .run(&mut backend, |cx| skin::bake(cx, "Std_Skin_Body", Props(&m)))
        .unwrap();

    assert_eq!(backend.kernel_sequence(), [k::MASK]);
    let rec = backend.find(k::MASK).unwrap();
    assert_eq!(rec.texture("Mask"), Some("body_mask"));
    let baked = out.maps.mask.unwrap();
    assert_eq!(baked.name(), "Std_Skin_Body_Mask");
    assert_eq!(
        baked.asset_path(),
        Some("Assets/Characters/Baked/Hero/Textures/Std_Skin_Body_Mask.png")
    );
    assert_eq!(out.template, MaterialType::Skin);
}

#[test]
fn non_head_skin_with_region_mask_uses_the_skin_mask_kernel() {
    let mut rig = Rig::new("skin_mask");
    let mut backend = RecordingBackend::new();
    let mask = tex("body_mask", 16);
    let rgba = tex("body_rgba", 16);
    let sss = tex("body_sss", 2048);
    let m = skin_material(&[("_MaskMap", &mask), ("_RGBAMask", &rgba), ("_SSSMap", &sss)]);

    let out = rig
        .run(&mut backend, |cx| skin::bake(cx, "Std_Skin_Body", Props(&m)))
        .unwrap();

    assert_eq!(backend.kernel_sequence(), [k::SKIN_MASK, k::SKIN_SUBSURFACE]);
    let sss_rec = backend.find(k::SKIN_SUBSURFACE).unwrap();
    assert_eq!((sss_rec.groups.x, sss_rec.groups.y), (1024, 1024));
    assert!(out.maps.subsurface.is_some());
    // Untouched slots keep nothing the source did not have.
    assert!(out.maps.base_color.is_none());
    assert!(out.maps.detail.is_none());
}

#[test]
fn head_diffuse_runs_only_with_every_input() {
    let diffuse = tex("head_diffuse", 32);
    let blend = tex("head_blend", 32);
    let cavity = tex("head_cavity", 32);

    let mut rig = Rig::new("head_full");
    let mut backend = RecordingBackend::new();
    let mut m = skin_material(&[
        ("_DiffuseMap", &diffuse),
        ("_ColorBlendMap", &blend),
        ("_MNAOMap", &cavity),
    ]);
    m.set_float(skin::IS_HEAD, 1.0);
    let out = rig
        .run(&mut backend, |cx| skin::bake(cx, "Std_Skin_Head", Props(&m)))
        .unwrap();
    let rec = backend.find(k::HEAD_DIFFUSE).unwrap();
    assert_eq!(rec.texture("CavityAO"), Some("head_cavity"));
    assert_eq!(out.maps.base_color.unwrap().name(), "Std_Skin_Head_BaseMap");

    let mut rig = Rig::new("head_partial");
    let mut backend = RecordingBackend::new();
    let mut m = skin_material(&[("_DiffuseMap", &diffuse), ("_ColorBlendMap", &blend)]);
    m.set_float(skin::IS_HEAD, 1.0);
    let out = rig
        .run(&mut backend, |cx| skin::bake(cx, "Std_Skin_Head", Props(&m)))
        .unwrap();
    assert!(backend.find(k::HEAD_DIFFUSE).is_none());
    assert!(Arc::ptr_eq(out.maps.base_color.as_ref().unwrap(), &diffuse));
}

#[test]
fn head_mask_degrades_to_plain_mask() {
    let mut rig = Rig::new("head_mask");
    let mut backend = RecordingBackend::new();
    let mask = tex("head_mask", 16);
    let rgba = tex("head_rgba", 16);
    let mut m = skin_material(&[("_MaskMap", &mask), ("_RGBAMask", &rgba)]);
    m.set_float(skin::IS_HEAD, 1.0);

    rig.run(&mut backend, |cx| skin::bake(cx, "Std_Skin_Head", Props(&m)))
        .unwrap();

    assert_eq!(backend.kernel_sequence(), [k::MASK]);
}

#[test]
fn head_mask_binds_rgba_as_nose_mouth_lid_regions() {
    let mut rig = Rig::new("head_regions");
    let mut backend = RecordingBackend::new();
    let names = ["m", "c", "r", "f", "e"].map(|n| tex(n, 8));
    let mut m = skin_material(&[
        ("_MaskMap", &names[0]),
        ("_MNAOMap", &names[1]),
        ("_RGBAMask", &names[2]),
        ("_CFULCMask", &names[3]),
        ("_EarNeckMask", &names[4]),
    ]);
    m.set_float(skin::IS_HEAD, 1.0);
    m.set_float("_RSmoothnessMod", 0.25);

    rig.run(&mut backend, |cx| skin::bake(cx, "Std_Skin_Head", Props(&m)))
        .unwrap();

    let rec = backend.find(k::HEAD_MASK).unwrap();
    assert_eq!(rec.texture("NMUILMask"), Some("r"));
    assert_eq!(rec.texture("CFULCMask"), Some("f"));
    assert_eq!(rec.texture("EarNeckMask"), Some("e"));
    assert_eq!(rec.float("noseMSM"), Some(0.25));
}

#[test]
fn missing_kernel_keeps_the_source_texture() {
    let mut rig = Rig::new("keep_source");
    let mut backend = RecordingBackend::new().without_kernel(k::MASK);
    let mask = tex("body_mask", 16);
    let m = skin_material(&[("_MaskMap", &mask)]);

    let out = rig
        .run(&mut backend, |cx| {
            let out = skin::bake(cx, "Std_Skin_Body", Props(&m));
            assert_eq!(cx.stats().skipped, 1);
            out
        })
        .unwrap();

    assert!(backend.dispatches().is_empty());
    assert!(Arc::ptr_eq(out.maps.mask.as_ref().unwrap(), &mask));
}

#[test]
fn hair_diffuse_selection() {
    let d = tex("hair_d", 8);
    let id = tex("hair_id", 8);
    let root = tex("hair_root", 8);
    let strands = |slots: &[(&str, &TextureRef)], color: bool| {
        let mut m = Material::new("Hair", "Reallusion/RL_HairShaderVariants");
        for (slot, t) in slots {
            m.set_texture(slot, Some(Arc::clone(t)));
        }
        m.set_float(hair::ENABLE_COLOR, if color { 1.0 } else { 0.0 });
        m
    };

    let all = [("_DiffuseMap", &d), ("_IDMap", &id), ("_RootMap", &root)];
    let m = strands(&all[..], true);
    assert_eq!(hair::select_diffuse(Props(&m)), hair::HairDiffuse::Colored);
    let m = strands(&all[..], false);
    assert_eq!(hair::select_diffuse(Props(&m)), hair::HairDiffuse::Tinted);
    let m = strands(&all[..2], true);
    assert_eq!(hair::select_diffuse(Props(&m)), hair::HairDiffuse::Tinted);
    let m = strands(&all[1..], true);
    assert_eq!(hair::select_diffuse(Props(&m)), hair::HairDiffuse::None);
}

#[test]
fn hair_recipe_renames_properties_for_the_builtin_shader() {
    let mut rig = Rig::new("hair_builtin");
    let mut backend = RecordingBackend::new();
    let d = tex("Hair_Diffuse", 8);
    let mut m = Material::new("Hair_Transparency", "Reallusion/RL_HairShaderVariants");
    m.set_texture("_DiffuseMap", Some(d));
    m.set_float("_AlphaClip", 0.3);
    m.set_color("_SpecularTint", [1.0, 0.5, 0.25, 1.0]);

    let out = rig
        .run(&mut backend, |cx| {
            hair::bake(cx, "Hair_Transparency", Props(&m), false)
        })
        .unwrap();

    assert_eq!(backend.kernel_sequence(), [k::HAIR_DIFFUSE]);
    assert_eq!(backend.find(k::HAIR_DIFFUSE).unwrap().texture("ColorBlend"), Some("fallback_mask"));
    assert_eq!(out.tiling, 1.0);
    assert_eq!(out.overrides.floats.get("_AlphaClipThreshold"), Some(&0.3));
    assert_eq!(out.overrides.colors.get("_SpecularColor"), Some(&[1.0, 0.5, 0.25, 1.0]));
    assert!(!out.overrides.floats.contains_key("_AlphaClip"));

    let mut backend = RecordingBackend::new();
    let out = rig
        .run(&mut backend, |cx| {
            hair::bake(cx, "Hair_Transparency", Props(&m), true)
        })
        .unwrap();
    assert_eq!(out.overrides.floats.get("_AlphaClip"), Some(&0.3));
    assert!(out.overrides.textures.contains_key("_FlowMap"));
}

#[test]
fn cornea_always_bakes_thickness() {
    let mut rig = Rig::new("cornea");
    let mut backend = RecordingBackend::new();
    let mut m = Material::new("Std_Cornea_L", "Reallusion/RL_EyeShaderVariants");
    m.set_float(eye::IS_CORNEA, 1.0);
    m.set_float("_RefractionThickness", 0.05);
    m.set_float("_IOR", 1.4);

    let out = rig
        .run(&mut backend, |cx| eye::bake(cx, "Std_Cornea_L", Props(&m)))
        .unwrap();

    assert_eq!(backend.kernel_sequence(), [k::CORNEA_THICKNESS]);
    let rec = backend.find(k::CORNEA_THICKNESS).unwrap();
    assert!((rec.float("thicknessScale").unwrap() - 0.2).abs() < 1e-6);
    assert_eq!((rec.groups.x, rec.groups.y), (256, 256));
    assert!(out.maps.thickness.is_some());
    assert_eq!(out.template, MaterialType::Cornea);
    assert!((out.overrides.floats["_Thickness"] - 0.005).abs() < 1e-6);
    assert_eq!(out.overrides.floats["_Ior"], 1.4);
    assert_eq!(
        out.overrides.colors["_ThicknessRemap"],
        eye::CORNEA_THICKNESS_REMAP
    );
}

#[test]
fn eye_without_cornea_flag_targets_the_eye_template() {
    let mut rig = Rig::new("eye");
    let mut backend = RecordingBackend::new();
    let cornea = tex("cornea_d", 16);
    let blend = tex("eye_blend", 16);
    let mut m = Material::new("Std_Eye_L", "Reallusion/RL_EyeShaderVariants");
    m.set_texture("_CorneaDiffuseMap", Some(cornea));
    m.set_texture("_ColorBlendMap", Some(blend));
    m.set_float("_PupilScale", 0.8);

    let out = rig
        .run(&mut backend, |cx| eye::bake(cx, "Std_Eye_L", Props(&m)))
        .unwrap();

    assert_eq!(backend.kernel_sequence(), [k::EYE_DIFFUSE]);
    assert_eq!(out.template, MaterialType::Eye);
    assert!(out.maps.thickness.is_none());
    assert_eq!(out.overrides.floats["_PupilScale"], 0.8);
}

#[test]
fn teeth_procedural_maps_are_thumbnail_sized() {
    let mut rig = Rig::new("teeth");
    let mut backend = RecordingBackend::new();
    let gums = tex("gums", 2048);
    let grad = tex("grad", 2048);
    let mut m = Material::new("Std_Upper_Teeth", "Reallusion/RL_TeethShader");
    m.set_texture("_GumsMaskMap", Some(gums));
    m.set_texture("_GradientAOMap", Some(grad));
    m.set_float("_IsUpperTeeth", 1.0);

    let out = rig
        .run(&mut backend, |cx| teeth::bake(cx, "Std_Upper_Teeth", Props(&m)))
        .unwrap();

    assert_eq!(
        backend.kernel_sequence(),
        [k::TEETH_SUBSURFACE, k::TEETH_THICKNESS]
    );
    for d in backend.dispatches() {
        assert_eq!((d.groups.x, d.groups.y), (256, 256));
    }
    assert_eq!(
        backend.find(k::TEETH_SUBSURFACE).unwrap().float("isUpperTeeth"),
        Some(1.0)
    );
    assert!(out.maps.subsurface.is_some() && out.maps.thickness.is_some());
}

#[test]
fn tongue_carries_its_thickness_property() {
    let mut rig = Rig::new("tongue");
    let mut backend = RecordingBackend::new();
    let mut m = Material::new("Std_Tongue", "Reallusion/RL_TongueShader");
    m.set_float("_TongueThickness", 0.4);

    let out = rig
        .run(&mut backend, |cx| tongue::bake(cx, "Std_Tongue", Props(&m)))
        .unwrap();

    assert!(backend.dispatches().is_empty());
    assert_eq!(out.template, MaterialType::Tongue);
    assert_eq!(out.overrides.floats["_Thickness"], 0.4);
}

#[test]
fn eye_occlusion_generates_base_color_only() {
    let mut rig = Rig::new("occlusion");
    let mut backend = RecordingBackend::new();
    let mut m = Material::new("Std_Eye_Occlusion_L", "Reallusion/RL_EyeOcclusionShader");
    m.set_float("_ExpandUpper", 0.002);

    let out = rig
        .run(&mut backend, |cx| {
            occlusion::bake(cx, "Std_Eye_Occlusion_L", Props(&m))
        })
        .unwrap();

    assert_eq!(backend.kernel_sequence(), [k::EYE_OCCLUSION_DIFFUSE]);
    assert!(out.maps.base_color.is_some());
    assert!(out.maps.mask.is_none() && out.maps.normal.is_none());
    assert_eq!(out.tiling, 1.0);
    assert_eq!(out.overrides.floats.len(), occlusion::EXPAND_PROPERTIES.len());
    assert_eq!(out.overrides.floats["_ExpandUpper"], 0.002);
}

#[test]
fn keep_only_replaces_with_a_baked_texture() {
    let original = tex("orig", 4);
    let baked = tex("baked", 4);
    let mut slot = Some(Arc::clone(&original));

    keep(&mut slot, None);
    assert!(Arc::ptr_eq(slot.as_ref().unwrap(), &original));
    keep(&mut slot, Some(Arc::clone(&baked)));
    assert!(Arc::ptr_eq(slot.as_ref().unwrap(), &baked));
}

#[test]
fn overrides_apply_onto_material() {
    let mut o = Overrides::default();
    assert!(o.is_empty());
    o.float("_Ior", 1.33)
        .color("_ThicknessRemap", [0.0, 0.025, 0.0, 0.0])
        .texture("_FlowMap", None);

    let mut m = Material::new("M", "HDRP/Lit");
    m.set_texture("_FlowMap", Some(tex("flow", 4)));
    o.apply(&mut m);

    assert_eq!(m.float("_Ior"), Some(1.33));
    assert_eq!(m.color("_ThicknessRemap"), Some([0.0, 0.025, 0.0, 0.0]));
    assert!(m.texture("_FlowMap").is_none());
}

#[test]
fn map_set_slots_follow_binding_order() {
    let names: Vec<_> = BakedMapSet::default()
        .slots()
        .iter()
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(
        names,
        [
            "_BaseColorMap",
            "_MaskMap",
            "_NormalMap",
            "_DetailMap",
            "_SubsurfaceMaskMap",
            "_ThicknessMap"
        ]
    );
}
