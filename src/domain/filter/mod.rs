//! The two screening gates.

pub mod trend_band;
pub mod volume_spike;

pub use trend_band::{TrendBandFilter, TrendCheck};
pub use volume_spike::{TradedVolume, VolumeCheck, VolumeMetric, VolumeSpikeFilter};
