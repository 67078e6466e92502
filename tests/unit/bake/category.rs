use super::*;

#[test]
fn tag_is_last_shader_path_segment() {
    let m = Material::new("Std_Upper_Teeth", "Reallusion/HQ/RL_TeethShader");
    assert_eq!(MaterialCategory::of(&m), Some(MaterialCategory::Teeth));

    let bare = Material::new("Tongue", "RL_TongueShader");
    assert_eq!(MaterialCategory::of(&bare), Some(MaterialCategory::Tongue));
}

#[test]
fn unknown_shaders_pass_through() {
    let m = Material::new("Glasses", "HDRP/Lit");
    assert_eq!(MaterialCategory::of(&m), None);
    assert_eq!(MaterialCategory::from_tag("rl_teethshader"), None);
}

#[test]
fn tags_round_trip() {
    for c in [
        MaterialCategory::Skin,
        MaterialCategory::Teeth,
        MaterialCategory::Tongue,
        MaterialCategory::Hair,
        MaterialCategory::Eye,
        MaterialCategory::EyeOcclusion,
    ] {
        assert_eq!(MaterialCategory::from_tag(c.tag()), Some(c));
    }
}
