use super::*;

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

#[test]
fn every_type_has_a_builtin_template() {
    let t = BuiltinTemplates::new(&BakeSettings::default());
    for ty in MaterialType::ALL {
        let m = t.template(ty).unwrap();
        assert_eq!(m.name, format!("RL_Template_Baked_{ty}"));
    }
    assert_eq!(t.template(MaterialType::Skin).unwrap().shader, "HDRP/Lit");
}

#[test]
fn hair_template_follows_custom_shader_setting() {
    let builtin = BuiltinTemplates::new(&BakeSettings::default());
    assert_eq!(builtin.template(MaterialType::Hair).unwrap().shader, BUILTIN_HAIR_SHADER);

    let custom = BuiltinTemplates::new(&BakeSettings {
        bake_custom_shaders: true,
        ..BakeSettings::default()
    });
    assert_eq!(custom.template(MaterialType::Hair).unwrap().shader, CUSTOM_HAIR_SHADER);
}

#[test]
fn directory_overrides_replace_single_types() {
    let dir = temp_dir("templates");
    std::fs::write(
        dir.join("Teeth.mat"),
        r#"{ "shader": "Custom/Teeth", "floats": { "_Smoothness": 0.25 } }"#,
    )
    .unwrap();

    let t = BuiltinTemplates::new(&BakeSettings::default())
        .with_overrides_from(&dir)
        .unwrap();
    let teeth = t.template(MaterialType::Teeth).unwrap();
    assert_eq!(teeth.shader, "Custom/Teeth");
    assert_eq!(teeth.float("_Smoothness"), Some(0.25));
    assert_eq!(t.template(MaterialType::Tongue).unwrap().shader, "HDRP/Lit");
}

#[test]
fn malformed_override_is_an_error() {
    let dir = temp_dir("templates_bad");
    std::fs::write(dir.join("Eye.mat"), "{ not json").unwrap();
    let err = BuiltinTemplates::new(&BakeSettings::default())
        .with_overrides_from(&dir)
        .unwrap_err();
    assert!(matches!(err, crate::foundation::error::BakeError::Serde(_)));
}
