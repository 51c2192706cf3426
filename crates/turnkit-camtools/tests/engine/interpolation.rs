use proptest::prelude::*;
use std::f64::consts::TAU;
use turnkit_camtools::{CrossSectionSample, CrossSectionTable};

fn uniform_table(radii: &[f64]) -> CrossSectionTable {
    let step = TAU / radii.len() as f64;
    CrossSectionTable::from_samples(
        radii
            .iter()
            .enumerate()
            .map(|(i, &r)| CrossSectionSample {
                theta: i as f64 * step,
                r,
            })
            .collect(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn exact_at_sample_angles(radii in prop::collection::vec(0.0f64..2.0, 1..64)) {
        let table = uniform_table(&radii);
        for sample in table.samples() {
            prop_assert_eq!(table.depth_at(sample.theta).unwrap(), sample.r);
        }
    }

    #[test]
    fn periodic_over_full_turn(
        radii in prop::collection::vec(0.0f64..2.0, 2..64),
        theta in 0.0f64..TAU,
    ) {
        let table = uniform_table(&radii);
        let a = table.depth_at(theta).unwrap();
        let b = table.depth_at(theta + TAU).unwrap();
        let c = table.depth_at(theta - TAU).unwrap();
        prop_assert!((a - b).abs() < 1e-6);
        prop_assert!((a - c).abs() < 1e-6);
    }

    #[test]
    fn bounded_by_samples(
        radii in prop::collection::vec(0.0f64..2.0, 1..64),
        theta in -20.0f64..20.0,
    ) {
        let table = uniform_table(&radii);
        let min = radii.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = radii.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let r = table.depth_at(theta).unwrap();
        prop_assert!(r >= min - 1e-9 && r <= max + 1e-9);
    }
}

#[test]
fn non_finite_angle_is_a_lookup_error() {
    let table = uniform_table(&[1.0, 2.0]);
    assert!(table.depth_at(f64::NAN).is_err());
    assert!(table.depth_at(f64::INFINITY).is_err());
}
