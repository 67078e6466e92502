use super::*;
use crate::foundation::core::{ColorSpace, TextureSemantic};

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

fn write_png(root: &Path, rel: &str, w: u32, h: u32, px: [u8; 4]) {
    let abs = root.join(rel);
    std::fs::create_dir_all(abs.parent().unwrap()).unwrap();
    RgbaImage::from_pixel(w, h, image::Rgba(px))
        .save_with_format(&abs, image::ImageFormat::Png)
        .unwrap();
}

#[test]
fn open_rejects_missing_root() {
    let missing = std::env::temp_dir().join("cc3bake_definitely_missing_root_dir");
    assert!(FsAssetDatabase::open(missing).is_err());
}

#[test]
fn load_texture_caches_handle_identity() {
    let root = temp_dir("fs_load");
    write_png(&root, "Assets/t.png", 4, 2, [10, 20, 30, 255]);
    let mut db = FsAssetDatabase::open(&root).unwrap();

    let a = db.load_texture("Assets/t.png").unwrap();
    let b = db.load_texture("Assets\\t.png").unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(a.extent().width, 4);
    assert_eq!(a.asset_path(), Some("Assets/t.png"));
    assert_eq!(a.name(), "t");

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn lossless_import_is_applied_once() {
    let root = temp_dir("fs_lossless");
    write_png(&root, "Assets/n.png", 2, 2, [128, 128, 255, 255]);
    let mut db = FsAssetDatabase::open(&root).unwrap();

    assert!(db.ensure_lossless_import("Assets/n.png", true).unwrap());
    assert!(!db.ensure_lossless_import("Assets/n.png", true).unwrap());

    let settings = db.import_settings("Assets/n.png").unwrap().unwrap();
    assert_eq!(settings.semantic, TextureSemantic::NormalMap);
    assert!(!settings.compressed);
    assert_eq!(settings.max_size, 4096);

    // Reading the same file as a non-normal flips its type back.
    assert!(db.ensure_lossless_import("Assets/n.png", false).unwrap());
    assert_eq!(db.stats().source_reimports, 2);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn write_texture_persists_png_and_settings() {
    let root = temp_dir("fs_write");
    let mut db = FsAssetDatabase::open(&root).unwrap();
    let img = RgbaImage::from_pixel(3, 3, image::Rgba([1, 2, 3, 4]));
    let settings = TextureImportSettings::baked(ColorSpace::Srgb, TextureSemantic::HairAlpha);

    let t = db
        .write_texture("Assets/Baked/Textures/Hair_BaseMap.png", &img, settings)
        .unwrap();
    assert_eq!(t.color_space(), ColorSpace::Srgb);
    assert!(root.join("Assets/Baked/Textures/Hair_BaseMap.png").exists());
    assert_eq!(
        db.import_settings("Assets/Baked/Textures/Hair_BaseMap.png")
            .unwrap(),
        Some(settings)
    );
    assert_eq!(db.stats().textures_written, 1);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn material_save_find_and_dirty_tracking() {
    let root = temp_dir("fs_material");
    write_png(&root, "Assets/t.png", 1, 1, [255; 4]);
    let mut db = FsAssetDatabase::open(&root).unwrap();

    let mut m = Material::new("Std_Eye_L", "HDRP/Lit");
    m.set_texture("_BaseColorMap", Some(db.load_texture("Assets/t.png").unwrap()));
    m.set_float("_Ior", 1.4);

    assert!(db.find_material("Assets/Mats", "Std_Eye_L").unwrap().is_none());
    db.save_material("Assets/Mats/Std_Eye_L.mat", &m).unwrap();
    assert!(db.write_import_settings_if_dirty("Assets/Mats/Std_Eye_L.mat").unwrap());
    assert!(!db.write_import_settings_if_dirty("Assets/Mats/Std_Eye_L.mat").unwrap());

    // Saving identical content does not dirty the asset again.
    db.save_material("Assets/Mats/Std_Eye_L.mat", &m).unwrap();
    assert!(!db.write_import_settings_if_dirty("Assets/Mats/Std_Eye_L.mat").unwrap());
    assert_eq!(db.stats().materials_written, 1);

    let found = db.find_material("Assets/Mats", "Std_Eye_L").unwrap().unwrap();
    assert_eq!(found.float("_Ior"), Some(1.4));
    assert_eq!(found.asset_path.as_deref(), Some("Assets/Mats/Std_Eye_L.mat"));
    assert!(found.texture("_BaseColorMap").is_some());

    db.reimport(&["Assets/Mats/Std_Eye_L.mat".to_string()]).unwrap();
    assert_eq!(db.stats().deferred_reimports, 1);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn unique_path_appends_counter() {
    let root = temp_dir("fs_unique");
    let mut db = FsAssetDatabase::open(&root).unwrap();
    assert_eq!(db.unique_path("Assets/A.mat"), "Assets/A.mat");
    db.save_material("Assets/A.mat", &Material::new("A", "HDRP/Lit"))
        .unwrap();
    assert_eq!(db.unique_path("Assets/A.mat"), "Assets/A 1.mat");
    db.save_material("Assets/A 1.mat", &Material::new("A", "HDRP/Lit"))
        .unwrap();
    assert_eq!(db.unique_path("Assets/A.mat"), "Assets/A 2.mat");

    std::fs::remove_dir_all(&root).ok();
}
