use super::*;
use crate::{assets::texture::Texture, foundation::core::Extent, kernel::library};

fn backend() -> CpuBackend {
    CpuBackend::new(CpuBackendOpts { threads: Some(2) }).unwrap()
}

fn mask_params(mask: [u8; 4]) -> KernelParams {
    let mut p = KernelParams::new();
    p.set_texture(
        "Mask",
        Texture::solid("mask", Extent::square(2), mask).into_shared(),
    )
    .set_float("aoStrength", 1.0)
    .set_float("smoothnessMin", 0.0)
    .set_float("smoothnessMax", 0.8)
    .set_float("smoothnessPower", 1.0)
    .set_float("microNormalStrength", 0.5);
    p
}

#[test]
fn every_library_kernel_resolves() {
    let b = backend();
    for name in CpuBackend::kernel_names() {
        assert!(b.find_kernel(name).is_some(), "{name}");
    }
    assert!(b.find_kernel("RLDoesNotExist").is_none());
}

#[test]
fn zero_threads_is_rejected() {
    let err = CpuBackend::new(CpuBackendOpts { threads: Some(0) })
        .err()
        .unwrap();
    assert!(matches!(err, BakeError::Validation(_)));
}

#[test]
fn kernel_pool_uses_requested_named_workers() {
    let b = CpuBackend::new(CpuBackendOpts { threads: Some(3) }).unwrap();
    assert_eq!(b.pool.current_num_threads(), 3);
    let name = b
        .pool
        .install(|| std::thread::current().name().map(str::to_owned));
    assert!(name.unwrap().starts_with("cc3-bake-kernel-"));
}

#[test]
fn mask_kernel_remaps_channels() {
    let mut b = backend();
    let id = b.find_kernel(library::MASK).unwrap();
    let img = b
        .dispatch(id, &mask_params([255; 4]), ThreadGroups::for_extent(Extent::square(3)))
        .unwrap();
    assert_eq!(img.dimensions(), (3, 3));
    assert!(img.pixels().all(|p| p.0 == [255, 255, 128, 204]));
}

#[test]
fn missing_float_names_kernel_and_parameter() {
    let mut b = backend();
    let id = b.find_kernel(library::MASK).unwrap();
    let mut params = KernelParams::new();
    params.set_texture(
        "Mask",
        Texture::solid("mask", Extent::square(2), [255; 4]).into_shared(),
    );
    let err = b
        .dispatch(id, &params, ThreadGroups::for_extent(Extent::square(2)))
        .unwrap_err();
    match err {
        BakeError::MissingParameter { kernel, name } => {
            assert_eq!(kernel, "RLMask");
            assert_eq!(name, "aoStrength");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_flat_grid_is_rejected() {
    let mut b = backend();
    let id = b.find_kernel(library::MASK).unwrap();
    let groups = ThreadGroups { x: 2, y: 2, z: 2 };
    assert!(matches!(
        b.dispatch(id, &mask_params([255; 4]), groups),
        Err(BakeError::Validation(_))
    ));
}

#[test]
fn output_rows_follow_image_orientation() {
    let mut img = RgbaImage::new(1, 2);
    img.put_pixel(0, 0, image::Rgba([255, 255, 255, 255]));
    img.put_pixel(0, 1, image::Rgba([0, 0, 0, 255]));
    let mut params = KernelParams::new();
    params
        .set_texture("Thickness", Texture::new("th", img).unwrap().into_shared())
        .set_float("thicknessScale", 1.0);

    let mut b = backend();
    let id = b.find_kernel(library::THICKNESS).unwrap();
    let out = b
        .dispatch(id, &params, ThreadGroups { x: 1, y: 2, z: 1 })
        .unwrap();
    assert_eq!(out.get_pixel(0, 0).0[0], 255);
    assert_eq!(out.get_pixel(0, 1).0[0], 0);
}
