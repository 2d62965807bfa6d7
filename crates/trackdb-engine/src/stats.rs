use std::sync::Arc;

use trackdb_core::error::Result;
use trackdb_core::traits::TrackStore;

use crate::messages;

const SIZE_SUFFIXES: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Reads aggregate counts from the store and formats a human-readable
/// summary.
pub struct StatsReporter<S> {
    store: Arc<S>,
}

impl<S: TrackStore> StatsReporter<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Catalog summary, or the fixed notice while the catalog is empty.
    pub fn report(&self) -> Result<String> {
        let (count, total_bytes) = self.store.aggregate_size()?;
        let Some(bytes) = total_bytes else {
            return Ok(messages::STATS_UNAVAILABLE.to_string());
        };
        Ok(format!("{} tracks, {}", count, human_size(bytes)))
    }
}

/// Format a byte count with the largest fitting unit.
///
/// The unit rank comes from the decimal magnitude (`log10(bytes) / 3`)
/// while the scaling is base-1024, so 1536 renders as "1.5 KB" and 1000 as
/// "0.98 KB". At most two decimals, trailing zeros and a trailing point
/// stripped. Zero has no logarithm and is special-cased.
pub fn human_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let rank = (((bytes as f64).log10() / 3.0).floor() as usize).min(SIZE_SUFFIXES.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(rank as i32);
    let rendered = format!("{:.2}", scaled);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, SIZE_SUFFIXES[rank])
}

#[cfg(test)]
mod tests {
    use super::human_size;

    #[test]
    fn zero_is_defined() {
        assert_eq!(human_size(0), "0 B");
    }

    #[test]
    fn bytes_stay_unscaled() {
        assert_eq!(human_size(512), "512 B");
    }

    #[test]
    fn kilobytes() {
        assert_eq!(human_size(1536), "1.5 KB");
    }

    #[test]
    fn decimal_rank_scales_by_1024() {
        // 1000 crosses the decimal threshold but not the 1024 one.
        assert_eq!(human_size(1000), "0.98 KB");
    }

    #[test]
    fn whole_values_drop_the_point() {
        assert_eq!(human_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn rank_is_clamped_to_petabytes() {
        assert_eq!(human_size(1_000_000_000_000_000_000), "888.18 PB");
    }
}
