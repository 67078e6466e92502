use proptest::prelude::*;

use super::*;
use crate::assets::texture::Texture;

fn tex(w: u32, h: u32) -> TextureRef {
    Texture::new("t", RgbaImage::new(w, h)).unwrap().into_shared()
}

fn allocator() -> TargetAllocator {
    TargetAllocator::new(&BakeSettings::default())
}

#[test]
fn map_kind_names() {
    assert_eq!(MapKind::BaseMap.texture_name("Std_Skin_Head"), "Std_Skin_Head_BaseMap");
    assert_eq!(MapKind::Subsurface.texture_name("Hair"), "Hair_SSSMap");
    assert_eq!(MapKind::Thickness.suffix(), "Thickness");
}

#[test]
fn from_inputs_takes_largest_present_input() {
    let a = tex(512, 256);
    let b = tex(128, 1024);
    let e = allocator().extent(SizeRule::FromInputs, &[Some(&a), None, Some(&b)]);
    assert_eq!(e, Extent::new(512, 1024).unwrap());
}

#[test]
fn region_cap_applies_to_subsurface_class() {
    let big = tex(4096, 2048);
    let e = allocator().extent(SizeRule::RegionCapped, &[Some(&big)]);
    assert_eq!(e, Extent::new(1024, 1024).unwrap());
    let small = tex(300, 200);
    let e = allocator().extent(SizeRule::RegionCapped, &[Some(&small)]);
    assert_eq!(e, Extent::new(300, 200).unwrap());
}

#[test]
fn thumbnail_ignores_inputs() {
    let big = tex(2048, 2048);
    assert_eq!(
        allocator().extent(SizeRule::Thumbnail, &[Some(&big)]),
        Extent::square(256)
    );
}

#[test]
fn no_inputs_falls_back_to_thumbnail() {
    assert_eq!(
        allocator().extent(SizeRule::FromInputs, &[None, None]),
        Extent::square(256)
    );
}

#[test]
fn hair_flags_follow_texture_name() {
    assert_eq!(
        TargetFlags::hair("Hair_Transparency_BaseMap").semantic,
        TextureSemantic::HairAlpha
    );
    assert_eq!(
        TargetFlags::hair("Std_Eyelash_BaseMap").semantic,
        TextureSemantic::AlphaClip
    );
    assert_eq!(TargetFlags::hair("Scalp_HAIR_BaseMap").color_space, ColorSpace::Srgb);
}

fn extent_strategy() -> impl Strategy<Value = Extent> {
    (1u32..16_384, 1u32..16_384).prop_map(|(w, h)| Extent { width: w, height: h })
}

proptest! {
    #[test]
    fn resolution_never_exceeds_caps(inputs in prop::collection::vec(extent_strategy(), 0..4)) {
        let alloc = allocator();
        let largest = inputs.iter().copied().reduce(Extent::max);

        let e = alloc.extent_of(SizeRule::FromInputs, inputs.clone());
        prop_assert!(e.width <= 4096 && e.height <= 4096);
        if let Some(largest) = largest {
            prop_assert!(e.width <= largest.width && e.height <= largest.height);
        }

        let e = alloc.extent_of(SizeRule::RegionCapped, inputs.clone());
        prop_assert!(e.width <= 1024 && e.height <= 1024);

        prop_assert_eq!(alloc.extent_of(SizeRule::Thumbnail, inputs), Extent::square(256));
    }
}
