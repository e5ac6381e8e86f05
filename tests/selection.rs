mod common;

use agrigenome_lib::model::data::GrowthStage;
use agrigenome_lib::model::engine::{FertilitySelector, ParentSelector};
use agrigenome_lib::model::Crop;
use common::{lab, mature, ScriptedRng, StubCrop};
use proptest::prelude::*;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn ids(selected: &[&dyn Crop]) -> Vec<String> {
    selected
        .iter()
        .map(|crop| crop.plant().id().to_string())
        .collect()
}

#[test]
fn test_selector_filters_ineligible_crops() {
    let genetics = lab();
    let ctx = genetics.context();
    let fertile = mature(&genetics, "wheat", 10);
    let mut immature = mature(&genetics, "carrot", 10);
    immature.growth = GrowthStage::first(4);
    let infertile = mature(&genetics, "potato", 10).with_fertile(false);
    let empty = agrigenome_lib::model::CropState::cross();

    let neighbours = [
        &empty as &dyn Crop,
        &immature as &dyn Crop,
        &fertile as &dyn Crop,
        &infertile as &dyn Crop,
    ];
    let mut rng = StepRng::new(0, 0);
    let selected =
        FertilitySelector.select_and_order(&mut neighbours.into_iter(), &ctx, &mut rng);
    assert_eq!(ids(&selected), vec!["wheat"]);
}

#[test]
fn test_selector_orders_by_fertility_and_is_stable() {
    let genetics = lab();
    let ctx = genetics.context();
    let a = mature(&genetics, "wheat", 5);
    let b = mature(&genetics, "carrot", 10);
    let c = mature(&genetics, "potato", 5);
    let d = mature(&genetics, "beetroot", 7);

    let neighbours = [&a as &dyn Crop, &b as &dyn Crop, &c as &dyn Crop, &d as &dyn Crop];
    let mut rng = StepRng::new(0, 0);
    let selected =
        FertilitySelector.select_and_order(&mut neighbours.into_iter(), &ctx, &mut rng);
    assert_eq!(ids(&selected), vec!["carrot", "beetroot", "wheat", "potato"]);
}

#[test]
fn test_zero_fertility_never_selected() {
    let genetics = lab();
    let ctx = genetics.context();
    let barren = mature(&genetics, "wheat", 0);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for _ in 0..200 {
        let selected =
            FertilitySelector.select_and_order(&mut [&barren as &dyn Crop].into_iter(), &ctx, &mut rng);
        assert!(selected.is_empty());
    }
}

#[test]
fn test_inclusion_frequency_tracks_fertility() {
    let genetics = lab();
    let ctx = genetics.context();
    let max = ctx.stats.fertility().max;
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let trials = 20_000;

    for fertility in [0u8, 3, 5, 8, 10] {
        let crop = mature(&genetics, "wheat", fertility);
        let mut included = 0;
        for _ in 0..trials {
            let selected = FertilitySelector.select_and_order(
                &mut [&crop as &dyn Crop].into_iter(),
                &ctx,
                &mut rng,
            );
            included += selected.len();
        }
        let observed = included as f64 / f64::from(trials);
        let expected = f64::from(fertility) / f64::from(max);
        assert!(
            (observed - expected).abs() < 0.02,
            "fertility {fertility}: observed {observed}, expected {expected}"
        );
    }
}

#[test]
fn test_each_candidate_rolls_its_own_draw() {
    let genetics = lab();
    let ctx = genetics.context();
    let wheat = mature(&genetics, "wheat", 5);
    let carrot = mature(&genetics, "carrot", 5);
    let neighbours = [&wheat as &dyn Crop, &carrot as &dyn Crop];

    // A top draw rolls 9 (rejected at fertility 5), a zero draw rolls 0.
    let mut rng = ScriptedRng::new(&[u32::MAX, 0]);
    let selected =
        FertilitySelector.select_and_order(&mut neighbours.into_iter(), &ctx, &mut rng);
    assert_eq!(ids(&selected), vec!["carrot"]);
    assert_eq!(rng.remaining(), 0);

    let mut rng = ScriptedRng::new(&[0, u32::MAX]);
    let selected =
        FertilitySelector.select_and_order(&mut neighbours.into_iter(), &ctx, &mut rng);
    assert_eq!(ids(&selected), vec!["wheat"]);
    assert_eq!(rng.remaining(), 0);
}

#[test]
fn test_joint_inclusion_is_product_of_rates() {
    let genetics = lab();
    let ctx = genetics.context();
    let max = f64::from(ctx.stats.fertility().max);
    let wheat = mature(&genetics, "wheat", 3);
    let carrot = mature(&genetics, "carrot", 8);
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let trials = 20_000;

    let (mut wheat_in, mut carrot_in, mut both) = (0u32, 0u32, 0u32);
    for _ in 0..trials {
        let selected = FertilitySelector.select_and_order(
            &mut [&wheat as &dyn Crop, &carrot as &dyn Crop].into_iter(),
            &ctx,
            &mut rng,
        );
        let names = ids(&selected);
        let has_wheat = names.iter().any(|id| id == "wheat");
        let has_carrot = names.iter().any(|id| id == "carrot");
        wheat_in += u32::from(has_wheat);
        carrot_in += u32::from(has_carrot);
        both += u32::from(has_wheat && has_carrot);
    }

    let rate = |count: u32| f64::from(count) / f64::from(trials);
    let (p_wheat, p_carrot) = (3.0 / max, 8.0 / max);
    assert!((rate(wheat_in) - p_wheat).abs() < 0.02, "wheat {}", rate(wheat_in));
    assert!((rate(carrot_in) - p_carrot).abs() < 0.02, "carrot {}", rate(carrot_in));
    assert!(
        (rate(both) - p_wheat * p_carrot).abs() < 0.02,
        "joint {}, expected {}",
        rate(both),
        p_wheat * p_carrot
    );
}

#[test]
fn test_invalid_crop_never_selected_even_when_fertile() {
    let genetics = lab();
    let ctx = genetics.context();
    let broken = StubCrop::new(false, true, true, 10);
    let healthy = StubCrop::eligible(10);

    let mut rng = StepRng::new(0, 0);
    let selected = FertilitySelector.select_and_order(
        &mut [&broken as &dyn Crop, &healthy as &dyn Crop].into_iter(),
        &ctx,
        &mut rng,
    );
    assert_eq!(selected.len(), 1);
    assert!(selected[0].is_valid());

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..200 {
        let selected = FertilitySelector.select_and_order(
            &mut [&broken as &dyn Crop].into_iter(),
            &ctx,
            &mut rng,
        );
        assert!(selected.is_empty());
    }
}

#[test]
fn test_same_seed_same_candidates() {
    let genetics = lab();
    let ctx = genetics.context();
    let crops = [
        mature(&genetics, "wheat", 4),
        mature(&genetics, "carrot", 6),
        mature(&genetics, "potato", 6),
        mature(&genetics, "beetroot", 9),
    ];
    let run = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..50)
            .map(|_| {
                let selected = FertilitySelector.select_and_order(
                    &mut crops.iter().map(|crop| crop as &dyn Crop),
                    &ctx,
                    &mut rng,
                );
                ids(&selected)
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(77), run(77));
}

fn stubs(flags: &[(u8, bool, bool, bool)]) -> Vec<StubCrop> {
    flags
        .iter()
        .map(|&(fertility, valid, mature, fertile)| StubCrop::new(valid, mature, fertile, fertility))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_selection_sorted_eligible_subset(
        flags in prop::collection::vec((0u8..=10, any::<bool>(), any::<bool>(), any::<bool>()), 0..8),
        seed in any::<u64>(),
    ) {
        let genetics = lab();
        let ctx = genetics.context();
        let fertility = ctx.stats.fertility();
        let crops = stubs(&flags);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let selected = FertilitySelector.select_and_order(
            &mut crops.iter().map(|crop| crop as &dyn Crop),
            &ctx,
            &mut rng,
        );

        prop_assert!(selected.len() <= crops.len());
        let values: Vec<u8> = selected.iter().map(|crop| crop.stat(fertility)).collect();
        prop_assert!(values.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(values.iter().all(|&v| v > 0));
        prop_assert!(selected.iter().all(|crop| crop.is_valid() && crop.is_mature() && crop.is_fertile()));
    }

    #[test]
    fn prop_certain_rolls_keep_every_eligible_crop(
        flags in prop::collection::vec((0u8..=10, any::<bool>(), any::<bool>(), any::<bool>()), 0..8),
    ) {
        let genetics = lab();
        let ctx = genetics.context();
        let crops = stubs(&flags);

        let mut rng = StepRng::new(0, 0);
        let selected = FertilitySelector.select_and_order(
            &mut crops.iter().map(|crop| crop as &dyn Crop),
            &ctx,
            &mut rng,
        );
        let eligible = flags
            .iter()
            .filter(|&&(f, valid, mature, fertile)| valid && mature && fertile && f > 0)
            .count();
        prop_assert_eq!(selected.len(), eligible);
    }
}
