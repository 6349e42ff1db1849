// Host-side tests for population generation.

use tree_core::*;

fn approx_vec3(a: glam::Vec3, b: glam::Vec3) -> bool {
    (a - b).abs().max_element() < 1e-5
}

#[test]
fn default_counts_match_constants() {
    let foliage = FoliagePopulation::generate(&mut population_rng(1, 0), &FoliageParams::default());
    assert_eq!(foliage.len(), FOLIAGE_COUNT);
    assert_eq!(foliage.chaos().len(), foliage.target().len());
    assert_eq!(foliage.seeds().len(), foliage.len());

    for kind in OrnamentKind::ALL {
        let pop = OrnamentPopulation::generate(&mut population_rng(1, 1), &OrnamentParams::for_kind(kind));
        assert_eq!(pop.len(), kind.default_count());
        assert_eq!(pop.kind(), kind);
    }
}

#[test]
fn same_seed_same_population() {
    let params = FoliageParams {
        count: 500,
        ..FoliageParams::default()
    };
    let a = FoliagePopulation::generate(&mut population_rng(42, 0), &params);
    let b = FoliagePopulation::generate(&mut population_rng(42, 0), &params);
    assert_eq!(a.target(), b.target());
    assert_eq!(a.seeds(), b.seeds());

    let c = FoliagePopulation::generate(&mut population_rng(42, 1), &params);
    assert_ne!(a.seeds(), c.seeds());
}

#[test]
fn seeds_are_unit_interval() {
    let pop = FoliagePopulation::generate(&mut population_rng(5, 0), &FoliageParams::default());
    assert!(pop.seeds().iter().all(|s| (0.0..1.0).contains(s)));
}

#[test]
fn from_parts_rejects_mismatched_arrays() {
    let err = FoliagePopulation::from_parts(vec![glam::Vec3::ZERO; 3], vec![glam::Vec3::ZERO; 2], vec![0.5; 3])
        .unwrap_err();
    assert_eq!(
        err,
        SceneError::PopulationMismatch {
            what: "foliage",
            chaos: 3,
            target: 2,
            seeds: 3,
        }
    );

    let ok = FoliagePopulation::from_parts(vec![glam::Vec3::ZERO; 2], vec![glam::Vec3::ONE; 2], vec![0.1, 0.9]);
    assert_eq!(ok.map(|p| p.len()), Ok(2));
}

#[test]
fn bauble_colors_are_gold_or_red() {
    let gold = srgb_to_linear_vec3(GOLD);
    let red = srgb_to_linear_vec3(DEEP_RED);
    let pop = OrnamentPopulation::generate(
        &mut population_rng(9, 1),
        &OrnamentParams::for_kind(OrnamentKind::Bauble),
    );
    let golds = pop.elements().iter().filter(|e| approx_vec3(e.color, gold)).count();
    let reds = pop.elements().iter().filter(|e| approx_vec3(e.color, red)).count();
    assert_eq!(golds + reds, pop.len());
    // 60/40 split, loosely
    assert!(golds > reds);
    for e in pop.elements() {
        assert!(e.scale >= 0.15 && e.scale <= 0.45);
    }
}

#[test]
fn photo_cards_use_the_palette_and_fixed_scale() {
    let palette: Vec<_> = PHOTO_PALETTE.iter().copied().map(srgb_to_linear_vec3).collect();
    let pop = OrnamentPopulation::generate(
        &mut population_rng(9, 3),
        &OrnamentParams::for_kind(OrnamentKind::PhotoCard),
    );
    for e in pop.elements() {
        assert!(palette.iter().any(|c| approx_vec3(*c, e.color)));
        assert_eq!(e.scale, PHOTO_SCALE);
    }
}

#[test]
fn gift_boxes_ring_below_the_tree() {
    let pop = OrnamentPopulation::generate(
        &mut population_rng(2, 2),
        &OrnamentParams::for_kind(OrnamentKind::GiftBox),
    );
    for e in pop.elements() {
        assert!((e.target_position.y - (-TREE_HEIGHT / 2.0 - GIFT_RING_DROP)).abs() < 1e-5);
        let r = (e.target_position.x.powi(2) + e.target_position.z.powi(2)).sqrt();
        assert!((2.5 - 1e-4..=5.5 + 1e-4).contains(&r));
        assert!(e.chaos_position.length() <= ORNAMENT_CHAOS_RADIUS + 1e-3);
    }
}

#[test]
fn empty_ornament_population_is_allowed() {
    let params = OrnamentParams {
        count: 0,
        ..OrnamentParams::for_kind(OrnamentKind::GiftBox)
    };
    let pop = OrnamentPopulation::generate(&mut population_rng(0, 2), &params);
    assert!(pop.is_empty());
}
