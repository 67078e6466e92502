use super::*;
use crate::assets::fs::FsAssetDatabase;

fn temp_dir(name: &str) -> std::path::PathBuf {
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

fn write_png(root: &Path, rel: &str) {
    let abs = root.join(rel);
    std::fs::create_dir_all(abs.parent().unwrap()).unwrap();
    image::RgbaImage::from_pixel(2, 2, image::Rgba([128, 128, 255, 255]))
        .save_with_format(&abs, image::ImageFormat::Png)
        .unwrap();
}

const MANIFEST: &str = r#"{
    "model_path": "Assets/Characters/Hero.fbx",
    "generation": "CC3",
    "nodes": [
        { "name": "Root" },
        { "name": "Body", "materials": ["Std_Skin_Body", "Std_Skin_Body"] },
        { "name": "Eyes", "materials": ["Std_Eye_L"] }
    ],
    "materials": {
        "Std_Skin_Body": {
            "shader": "Reallusion/RL_SkinShaderVariants",
            "textures": { "_NormalMap": "Assets/Characters/Textures/body_n.png" },
            "floats": { "_AOStrength": 1.0 }
        },
        "Std_Eye_L": {
            "shader": "Reallusion/RL_EyeShaderVariants",
            "source_name": "Std_Eye_L_Source"
        }
    }
}"#;

#[test]
fn load_builds_graph_with_shared_materials() {
    let root = temp_dir("manifest_load");
    write_png(&root, "Assets/Characters/Textures/body_n.png");
    let mut db = FsAssetDatabase::open(&root).unwrap();

    let manifest = CharacterManifest::from_json(MANIFEST).unwrap();
    let ch = Character::load(&manifest, &mut db).unwrap();

    assert_eq!(ch.name, "Hero");
    assert!(ch.is_cc3());
    assert_eq!(ch.graph.nodes.len(), 3);
    assert!(ch.graph.nodes[0].renderer.is_none());
    let body = &ch.graph.nodes[1].renderer.as_ref().unwrap().materials;
    assert!(Arc::ptr_eq(&body[0], &body[1]));
    assert_eq!(ch.graph.unique_materials().len(), 2);

    let skin = &body[0];
    assert!(skin.texture("_NormalMap").is_some());
    assert_eq!(skin.float("_AOStrength"), Some(1.0));

    // The normal slot was switched to lossless normal-map import before loading.
    let settings = db
        .import_settings("Assets/Characters/Textures/body_n.png")
        .unwrap()
        .unwrap();
    assert!(settings.is_lossless(true));

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn source_name_recovery_prefers_recorded_name() {
    let root = temp_dir("manifest_source");
    write_png(&root, "Assets/Characters/Textures/body_n.png");
    let mut db = FsAssetDatabase::open(&root).unwrap();
    let ch = Character::load(&CharacterManifest::from_json(MANIFEST).unwrap(), &mut db).unwrap();

    let eye = &ch.graph.nodes[2].renderer.as_ref().unwrap().materials[0];
    assert_eq!(ch.source_name(eye), "Std_Eye_L_Source");
    let skin = &ch.graph.nodes[1].renderer.as_ref().unwrap().materials[0];
    assert_eq!(ch.source_name(skin), "Std_Skin_Body");

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn unknown_material_reference_is_rejected() {
    let root = temp_dir("manifest_unknown");
    let mut db = FsAssetDatabase::open(&root).unwrap();
    let manifest = CharacterManifest::from_json(
        r#"{ "model_path": "Assets/A.fbx", "generation": "CC3",
             "nodes": [ { "name": "Body", "materials": ["Nope"] } ] }"#,
    )
    .unwrap();
    assert!(matches!(
        Character::load(&manifest, &mut db),
        Err(BakeError::Validation(_))
    ));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn other_generations_are_not_cc3() {
    let root = temp_dir("manifest_gen");
    let mut db = FsAssetDatabase::open(&root).unwrap();
    let manifest = CharacterManifest::from_json(
        r#"{ "model_path": "Assets/A.fbx", "generation": "CC4", "nodes": [] }"#,
    )
    .unwrap();
    assert!(!Character::load(&manifest, &mut db).unwrap().is_cc3());
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn normal_slots_are_detected_by_name() {
    assert!(is_normal_slot("_NormalMap"));
    assert!(is_normal_slot("_MicroNormalMap"));
    assert!(is_normal_slot("_ScleraNormalMap"));
    assert!(!is_normal_slot("_DiffuseMap"));
    assert!(!is_normal_slot("_NormalStrength"));
}
