//! Progress reporter implementation
//!
//! Uses indicatif for the hashing progress bar with byte position,
//! throughput, and ETA display. The bar is driven by the scan's progress
//! notifications, roughly one per percent of the input.

use indicatif::{ProgressBar, ProgressStyle};

/// Byte-progress reporter for one hashing pass
pub struct HashProgress {
    bar: ProgressBar,
    enabled: bool,
}

impl HashProgress {
    /// Create a reporter for `total` bytes
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{prefix:.bold.dim} [{bar:50.green/white}] {bytes}/{total_bytes} ({bytes_per_sec}, ETA {eta})",
                )
                .expect("Invalid template")
                .progress_chars("#>-"),
        );
        bar.set_prefix("Hashing");
        Self { bar, enabled: true }
    }

    /// Create a hidden reporter (for quiet mode)
    pub fn disabled() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            enabled: false,
        }
    }

    /// Move the bar to an absolute byte position
    pub fn set_position(&self, processed: u64) {
        self.bar.set_position(processed);
    }

    /// Whether the bar is actually rendering
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Remove the bar once hashing is done
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_accepts_updates() {
        let progress = HashProgress::disabled();
        assert!(!progress.is_enabled());
        progress.set_position(512);
        progress.finish();
    }

    #[test]
    fn test_enabled_reporter_tracks_position() {
        let progress = HashProgress::new(1000);
        assert!(progress.is_enabled());
        progress.set_position(250);
        assert_eq!(progress.bar.position(), 250);
        progress.finish();
    }
}
