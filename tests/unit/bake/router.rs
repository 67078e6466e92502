use std::path::PathBuf;

use super::*;
use crate::{
    assets::{fs::FsAssetDatabase, paths::BakePaths},
    bake::fallback::FallbackPolicy,
    kernel::{ComputeBackend, RecordingBackend, library as k},
    scene::template::MaterialType,
};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "cc3bake_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn route_with(
    name: &str,
    material: &Material,
    settings: &BakeSettings,
) -> (Option<RecipeOutput>, Vec<String>) {
    let root = temp_dir(name);
    let mut db = FsAssetDatabase::open(&root).unwrap();
    let paths = BakePaths::for_model("Assets/Hero/Hero.fbx").unwrap();
    let fallback = FallbackPolicy::new();
    let mut backend = RecordingBackend::new();

    let out = {
        let mut cx = BakeContext::new(
            Some(&mut backend as &mut dyn ComputeBackend),
            &mut db,
            &paths,
            &fallback,
            settings,
        );
        route(&mut cx, material, &material.name, settings).unwrap()
    };
    std::fs::remove_dir_all(&root).ok();
    let kernels = backend
        .kernel_sequence()
        .into_iter()
        .map(str::to_string)
        .collect();
    (out, kernels)
}

#[test]
fn unrecognized_shaders_pass_through() {
    let m = Material::new("Std_Nails", "HDRP/Lit");
    let (out, kernels) = route_with("route_passthrough", &m, &BakeSettings::default());
    assert!(out.is_none());
    assert!(kernels.is_empty());

    // Near misses on the tag are not categories either.
    let m = Material::new("Std_Skin", "Reallusion/RL_SkinShader");
    let (out, _) = route_with("route_near_miss", &m, &BakeSettings::default());
    assert!(out.is_none());
}

#[test]
fn each_category_lands_on_its_template() {
    let cases = [
        ("Reallusion/RL_SkinShaderVariants", MaterialType::Skin),
        ("Reallusion/RL_TeethShader", MaterialType::Teeth),
        ("Reallusion/RL_TongueShader", MaterialType::Tongue),
        ("Reallusion/RL_HairShaderVariants", MaterialType::Hair),
        ("Reallusion/RL_EyeShaderVariants", MaterialType::Eye),
        ("Reallusion/RL_EyeOcclusionShader", MaterialType::EyeOcclusion),
    ];
    for (i, (shader, template)) in cases.into_iter().enumerate() {
        let m = Material::new(format!("M{i}"), shader);
        let (out, _) = route_with(&format!("route_cat_{i}"), &m, &BakeSettings::default());
        assert_eq!(out.unwrap().template, template, "{shader}");
    }
}

#[test]
fn cornea_flag_selects_the_cornea_template() {
    let mut m = Material::new("Std_Cornea_R", "Reallusion/RL_EyeShaderVariants");
    m.set_float("BOOLEAN_ISCORNEA", 1.0);
    let (out, kernels) = route_with("route_cornea", &m, &BakeSettings::default());
    assert_eq!(out.unwrap().template, MaterialType::Cornea);
    assert_eq!(kernels, [k::CORNEA_THICKNESS]);
}

#[test]
fn hair_override_names_follow_the_custom_shader_setting() {
    let m = Material::new("Hair", "Reallusion/RL_HairShaderVariants");

    let (out, _) = route_with("route_hair_builtin", &m, &BakeSettings::default());
    assert!(out.unwrap().overrides.floats.contains_key("_AlphaClipThreshold"));

    let custom = BakeSettings {
        bake_custom_shaders: true,
        ..BakeSettings::default()
    };
    let (out, _) = route_with("route_hair_custom", &m, &custom);
    assert!(out.unwrap().overrides.floats.contains_key("_AlphaClip"));
}
