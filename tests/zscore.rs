use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use sentiment_quadrant::{
    data::types::{Observation, Series},
    error::{DegenerateCause, Dimension, PipelineError},
    sentiment::{self, quadrant::Quadrant, zscore},
};

fn series_of(points: &[(f64, f64)]) -> Series {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let observations = points
        .iter()
        .enumerate()
        .map(|(i, (strength, breadth))| {
            Observation::new(start + Duration::days(i as i64), *strength, *breadth)
        })
        .collect();
    Series::new(observations).unwrap()
}

fn sample_moments(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

#[test]
fn worked_example_lands_in_mixed() {
    let series = series_of(&[(10.0, 10.0), (12.0, 8.0), (14.0, 6.0), (16.0, 4.0), (18.0, 2.0)]);
    let normalized = zscore::normalize(&series).unwrap();
    assert!((normalized.strength.mean - 14.0).abs() < 1e-12);
    assert!((normalized.strength.std_dev - 3.162).abs() < 1e-3);

    let report = sentiment::analyze(&series).unwrap();
    assert!((report.latest_point.z_strength - 1.265).abs() < 1e-3);
    assert!(report.latest_point.z_breadth < 0.0);
    assert_eq!(report.latest_quadrant, Quadrant::Mixed);
}

#[test]
fn output_keeps_length_and_timestamps() {
    let series = series_of(&[(1.0, 5.0), (3.0, 2.0), (2.0, 9.0), (7.0, 1.0)]);
    let normalized = zscore::normalize(&series).unwrap();
    assert_eq!(normalized.observations.len(), series.len());
    for (raw, z) in series.observations().iter().zip(&normalized.observations) {
        assert_eq!(raw.timestamp, z.timestamp);
    }
}

#[test]
fn normalizing_twice_is_identical() {
    let series = series_of(&[(48.2, 51.0), (52.7, 49.3), (61.0, 40.1), (55.5, 44.4)]);
    assert_eq!(sentiment::analyze(&series).unwrap(), sentiment::analyze(&series).unwrap());
}

#[test]
fn constant_strength_is_degenerate() {
    let series = series_of(&[(5.0, 1.0), (5.0, 2.0), (5.0, 3.0)]);
    let err = zscore::normalize(&series).unwrap_err();
    assert_eq!(
        err,
        PipelineError::DegenerateSeries {
            dimension: Dimension::Strength,
            cause: DegenerateCause::ZeroVariance,
        }
    );
}

#[test]
fn constant_breadth_is_degenerate_even_with_rounding_noise() {
    let series = series_of(&[(1.0, 0.1), (2.0, 0.1), (3.0, 0.1), (4.0, 0.1), (5.0, 0.1)]);
    let err = sentiment::analyze(&series).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::DegenerateSeries {
            dimension: Dimension::Breadth,
            cause: DegenerateCause::ZeroVariance,
        }
    ));
}

#[test]
fn small_spread_still_standardises() {
    for strengths in [[0.0, 1e-13, 3e-13], [1e6, 1e6 + 1e-7, 1e6 + 3e-7]] {
        let points: Vec<(f64, f64)> = strengths
            .iter()
            .zip([1.0, 2.0, 4.0])
            .map(|(s, b)| (*s, b))
            .collect();
        let normalized = zscore::normalize(&series_of(&points)).unwrap();
        let zs: Vec<f64> = normalized.observations.iter().map(|o| o.z_strength).collect();
        let (mean, std) = sample_moments(&zs);
        // The mean of readings near 1e6 is only known to ~1e-10.
        assert!(mean.abs() < 1e-2);
        assert!((std - 1.0).abs() < 1e-6);
        assert!(zs[0] < zs[1] && zs[1] < zs[2]);
    }
}

#[test]
fn extreme_but_finite_readings_standardise() {
    let normalized = zscore::normalize(&series_of(&[(1e308, 1.0), (-1e308, 2.0)])).unwrap();
    let zs: Vec<f64> = normalized.observations.iter().map(|o| o.z_strength).collect();
    assert!((zs[0] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    assert!((zs[1] + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
}

#[test]
fn spread_beyond_f64_reports_overflow() {
    let series = series_of(&[(f64::MAX, 1.0), (-f64::MAX, 2.0), (f64::MAX, 3.0)]);
    let err = zscore::normalize(&series).unwrap_err();
    assert_eq!(
        err,
        PipelineError::DegenerateSeries {
            dimension: Dimension::Strength,
            cause: DegenerateCause::Overflow,
        }
    );
}

#[test]
fn single_observation_is_degenerate() {
    let series = series_of(&[(42.0, 17.0)]);
    let err = sentiment::analyze(&series).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::DegenerateSeries {
            cause: DegenerateCause::TooFewPoints,
            ..
        }
    ));
}

#[test]
fn empty_series_is_reported() {
    let err = sentiment::analyze(&Series::default()).unwrap_err();
    assert_eq!(err, PipelineError::EmptySeries);
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

fn assert_standardised(points: &[(f64, f64)]) -> Result<(), TestCaseError> {
    let strengths: Vec<f64> = points.iter().map(|p| p.0).collect();
    let breadths: Vec<f64> = points.iter().map(|p| p.1).collect();
    prop_assume!(!is_constant(&strengths) && !is_constant(&breadths));

    let normalized = zscore::normalize(&series_of(points));
    prop_assert!(normalized.is_ok(), "unexpected failure: {:?}", normalized);
    let normalized = normalized.unwrap();
    prop_assert_eq!(normalized.observations.len(), points.len());
    let zs: Vec<f64> = normalized.observations.iter().map(|o| o.z_strength).collect();
    let zb: Vec<f64> = normalized.observations.iter().map(|o| o.z_breadth).collect();
    for values in [zs, zb] {
        prop_assert!(values.iter().all(|v| v.is_finite()));
        let (mean, std) = sample_moments(&values);
        prop_assert!(mean.abs() < 1e-9, "mean {}", mean);
        prop_assert!((std - 1.0).abs() < 1e-9, "std {}", std);
    }
    Ok(())
}

proptest! {
    #[test]
    fn z_scores_have_zero_mean_and_unit_deviation(
        points in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 2..40)
    ) {
        assert_standardised(&points)?;
    }

    #[test]
    fn z_scores_ignore_the_scale_of_the_readings(
        points in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 2..40),
        scale in prop::sample::select(vec![1e-200, 1e-12, 1e-3, 1e6, 1e250]),
    ) {
        let scaled: Vec<(f64, f64)> = points.iter().map(|(s, b)| (s * scale, b * scale)).collect();
        assert_standardised(&scaled)?;
    }

    #[test]
    fn constant_strength_never_standardises(
        level in -1000.0f64..1000.0,
        breadths in prop::collection::vec(-1000.0f64..1000.0, 2..40),
    ) {
        let points: Vec<(f64, f64)> = breadths.iter().map(|b| (level, *b)).collect();
        let err = zscore::normalize(&series_of(&points)).unwrap_err();
        prop_assert_eq!(
            err,
            PipelineError::DegenerateSeries {
                dimension: Dimension::Strength,
                cause: DegenerateCause::ZeroVariance,
            }
        );
    }
}
