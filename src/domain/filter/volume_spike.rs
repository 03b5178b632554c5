//! Volume spike against a 5-day baseline.
//!
//! Takes the trailing 6 bars: the last one is "latest", the 5 before it form
//! the baseline. Passes when latest >= 3 * mean(baseline).

use crate::domain::indicator::mean;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::series::HistoricalSeries;

pub const VOLUME_WINDOW: usize = 6;
pub const SPIKE_MULTIPLE: f64 = 3.0;

/// Which per-bar quantity the spike test runs on.
pub trait VolumeMetric {
    fn name(&self) -> &str;

    /// True when the metric approximates a quantity the source cannot supply.
    fn is_proxy(&self) -> bool {
        false
    }

    fn extract(&self, bar: &OhlcvBar) -> Option<f64>;
}

/// Total traded volume, standing in for delivery volume.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradedVolume;

impl VolumeMetric for TradedVolume {
    fn name(&self) -> &str {
        "traded volume"
    }

    fn is_proxy(&self) -> bool {
        true
    }

    fn extract(&self, bar: &OhlcvBar) -> Option<f64> {
        bar.valid_volume()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeCheck {
    /// Fewer than 6 bars, or a metric value missing among them.
    Insufficient { available: usize },
    Evaluated {
        latest: f64,
        baseline_average: f64,
        spiked: bool,
    },
}

impl VolumeCheck {
    pub fn passed(&self) -> bool {
        matches!(self, VolumeCheck::Evaluated { spiked: true, .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct VolumeSpikeFilter<M: VolumeMetric = TradedVolume> {
    metric: M,
}

impl<M: VolumeMetric> VolumeSpikeFilter<M> {
    pub fn with_metric(metric: M) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn evaluate(&self, series: &HistoricalSeries) -> VolumeCheck {
        let window = series.tail(VOLUME_WINDOW);
        let values: Vec<Option<f64>> = window.iter().map(|b| self.metric.extract(b)).collect();
        let available = values.iter().filter(|v| v.is_some()).count();

        if window.len() < VOLUME_WINDOW || available < VOLUME_WINDOW {
            return VolumeCheck::Insufficient { available };
        }

        let values: Vec<f64> = values.into_iter().flatten().collect();
        let (baseline, latest) = values.split_at(VOLUME_WINDOW - 1);
        let latest = latest[0];
        match mean(baseline) {
            Some(baseline_average) => VolumeCheck::Evaluated {
                latest,
                baseline_average,
                spiked: Self::is_spike(latest, baseline_average),
            },
            None => VolumeCheck::Insufficient { available },
        }
    }

    pub fn is_spike(latest: f64, baseline_average: f64) -> bool {
        latest >= SPIKE_MULTIPLE * baseline_average
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series_from_volumes(volumes: &[Option<f64>]) -> HistoricalSeries {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let bars = volumes
            .iter()
            .enumerate()
            .map(|(i, &volume)| OhlcvBar {
                date: start + Duration::days(i as i64),
                open: Some(10.0),
                high: Some(10.0),
                low: Some(10.0),
                close: Some(10.0),
                volume,
            })
            .collect();
        HistoricalSeries::new("TEST", bars).unwrap()
    }

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn spike_above_multiple_passes() {
        let check = VolumeSpikeFilter::<TradedVolume>::default()
            .evaluate(&series_from_volumes(&some(&[1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 4000.0])));
        assert_eq!(
            check,
            VolumeCheck::Evaluated {
                latest: 4000.0,
                baseline_average: 1000.0,
                spiked: true
            }
        );
    }

    #[test]
    fn exact_multiple_passes() {
        let check = VolumeSpikeFilter::<TradedVolume>::default()
            .evaluate(&series_from_volumes(&some(&[100.0, 100.0, 100.0, 100.0, 100.0, 300.0])));
        assert!(check.passed());
    }

    #[test]
    fn one_unit_below_multiple_fails() {
        let check = VolumeSpikeFilter::<TradedVolume>::default()
            .evaluate(&series_from_volumes(&some(&[100.0, 100.0, 100.0, 100.0, 100.0, 299.0])));
        assert!(matches!(check, VolumeCheck::Evaluated { spiked: false, .. }));
    }

    #[test]
    fn only_trailing_six_bars_count() {
        let check = VolumeSpikeFilter::<TradedVolume>::default().evaluate(&series_from_volumes(
            &some(&[1_000_000.0, 100.0, 100.0, 100.0, 100.0, 100.0, 300.0]),
        ));
        assert!(check.passed());
    }

    #[test]
    fn fewer_than_six_bars_is_insufficient() {
        let check = VolumeSpikeFilter::<TradedVolume>::default()
            .evaluate(&series_from_volumes(&some(&[100.0, 100.0, 100.0, 100.0, 900.0])));
        assert_eq!(check, VolumeCheck::Insufficient { available: 5 });
    }

    #[test]
    fn missing_volume_in_window_is_insufficient() {
        let volumes = vec![
            Some(100.0),
            Some(100.0),
            None,
            Some(100.0),
            Some(100.0),
            Some(900.0),
        ];
        let check = VolumeSpikeFilter::<TradedVolume>::default().evaluate(&series_from_volumes(&volumes));
        assert_eq!(check, VolumeCheck::Insufficient { available: 5 });
    }

    #[test]
    fn traded_volume_is_a_proxy() {
        assert!(TradedVolume.is_proxy());
        assert_eq!(TradedVolume.name(), "traded volume");
    }

    struct Turnover;

    impl VolumeMetric for Turnover {
        fn name(&self) -> &str {
            "turnover"
        }

        fn extract(&self, bar: &OhlcvBar) -> Option<f64> {
            Some(bar.valid_close()? * bar.valid_volume()?)
        }
    }

    #[test]
    fn custom_metric_changes_only_extraction() {
        let filter = VolumeSpikeFilter::with_metric(Turnover);
        assert!(!filter.metric().is_proxy());
        let check = filter
            .evaluate(&series_from_volumes(&some(&[100.0, 100.0, 100.0, 100.0, 100.0, 300.0])));
        assert_eq!(
            check,
            VolumeCheck::Evaluated {
                latest: 3000.0,
                baseline_average: 1000.0,
                spiked: true
            }
        );
    }
}
