use super::*;

#[test]
fn extent_rejects_empty_dimensions() {
    assert!(Extent::new(0, 4).is_err());
    assert!(Extent::new(4, 0).is_err());
    assert_eq!(Extent::new(3, 5).unwrap().pixel_count(), 15);
}

#[test]
fn extent_max_and_clamp() {
    let a = Extent::new(2048, 512).unwrap();
    let b = Extent::new(1024, 8192).unwrap();
    let m = a.max(b);
    assert_eq!(m, Extent::new(2048, 8192).unwrap());
    assert_eq!(m.clamp_to(MAX_TEXTURE_SIZE), Extent::new(2048, 4096).unwrap());
    assert_eq!(Extent::square(300).clamp_to(256), Extent::square(256));
}

#[test]
fn color_space_and_semantic_serialize_snake_case() {
    assert_eq!(serde_json::to_string(&ColorSpace::Srgb).unwrap(), "\"srgb\"");
    assert_eq!(
        serde_json::to_string(&TextureSemantic::HairAlpha).unwrap(),
        "\"hair_alpha\""
    );
}
