use costmap_core::prelude::*;
use costmap_core::scale::{palette, VIRIDIS_10};

const NO_VALUES: [Option<f64>; 0] = [];

fn one_to_hundred() -> Vec<Option<f64>> {
    (1..=100).map(|v| Some(v as f64)).collect()
}

#[test]
fn quantile_scale_covers_the_whole_palette() {
    let scale = ColorScale::build(&ScaleConfig::quantile(10), one_to_hundred()).unwrap();

    assert_eq!(scale.color_for(Some(1.0)), VIRIDIS_10[0]);
    assert_eq!(scale.color_for(Some(100.0)), VIRIDIS_10[9]);
    for v in 1..=100 {
        let c = scale.color_for(Some(v as f64));
        assert!(VIRIDIS_10.contains(&c), "value {v} got {c}");
    }
}

#[test]
fn quantile_buckets_hold_equal_populations() {
    let scale = ColorScale::build(&ScaleConfig::quantile(4), one_to_hundred()).unwrap();
    let colors = palette(4);
    let mut counts = [0usize; 4];
    for v in 1..=100 {
        let c = scale.color_for(Some(v as f64));
        let idx = colors.iter().position(|p| *p == c).unwrap();
        counts[idx] += 1;
    }
    assert_eq!(counts, [25, 25, 25, 25]);
}

#[test]
fn missing_values_get_the_reserved_color() {
    for config in [ScaleConfig::quantile(10), ScaleConfig::sequential(0.0, 120.0)] {
        let scale = ColorScale::build(&config, one_to_hundred()).unwrap();
        assert_eq!(scale.color_for(None), NO_DATA_COLOR);
        assert_eq!(scale.color_for(Some(f64::NAN)), NO_DATA_COLOR);
        assert_eq!(scale.color_for(Some(f64::INFINITY)), NO_DATA_COLOR);
    }
    assert!(!VIRIDIS_10.contains(&NO_DATA_COLOR));
}

#[test]
fn missing_values_do_not_shift_quantiles() {
    let mut values = one_to_hundred();
    let clean = ColorScale::build(&ScaleConfig::default(), values.clone()).unwrap();
    values.extend([None, Some(f64::NAN), None]);
    let noisy = ColorScale::build(&ScaleConfig::default(), values).unwrap();
    assert_eq!(clean, noisy);
}

#[test]
fn sequential_scale_clamps_to_its_domain() {
    let scale = ColorScale::build(&ScaleConfig::sequential(0.0, 120.0), NO_VALUES).unwrap();

    assert_eq!(scale.color_for(Some(0.0)), VIRIDIS_10[0]);
    assert_eq!(scale.color_for(Some(-20.0)), VIRIDIS_10[0]);
    assert_eq!(scale.color_for(Some(120.0)), VIRIDIS_10[9]);
    assert_eq!(scale.color_for(Some(250.0)), VIRIDIS_10[9]);

    let mid = scale.color_for(Some(60.0));
    assert_ne!(mid, VIRIDIS_10[0]);
    assert_ne!(mid, VIRIDIS_10[9]);
    assert_ne!(mid, NO_DATA_COLOR);
}

#[test]
fn legend_is_generated_from_the_fill_scale() {
    for config in [ScaleConfig::quantile(10), ScaleConfig::sequential(0.0, 120.0)] {
        let scale = ColorScale::build(&config, one_to_hundred()).unwrap();
        let legend = scale.legend();

        let last = legend.last().unwrap();
        assert_eq!(last.color, NO_DATA_COLOR);
        assert_eq!(last.label, "No data");
        for entry in &legend[..legend.len() - 1] {
            assert_eq!(scale.color_for(entry.lower), entry.color);
        }
    }
}

#[test]
fn quantile_legend_starts_at_the_rounded_minimum() {
    let values = [Some(12.6), Some(40.0), Some(55.5), Some(99.0)];
    let scale = ColorScale::build(&ScaleConfig::quantile(3), values).unwrap();
    let legend = scale.legend();

    assert_eq!(legend.len(), 3 + 1);
    assert_eq!(legend[0].label, "13");
    assert_eq!(legend[0].color, palette(3)[0]);
}

#[test]
fn empty_domain_maps_everything_to_no_data() {
    let scale = ColorScale::build(&ScaleConfig::quantile(10), [None::<f64>, None]).unwrap();
    assert_eq!(scale.color_for(Some(50.0)), NO_DATA_COLOR);
    assert_eq!(scale.legend().len(), 1);
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(ColorScale::build(&ScaleConfig::quantile(0), one_to_hundred()).is_err());
    assert!(ColorScale::build(&ScaleConfig::sequential(5.0, 5.0), NO_VALUES).is_err());
    assert!(ColorScale::build(&ScaleConfig::sequential(0.0, f64::NAN), NO_VALUES).is_err());
}
