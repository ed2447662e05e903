//! Runtime configuration resolved from the environment.

/// Default number of LUT samples when baking.
const DEFAULT_LUT_SIZE: usize = 256;
/// Default row count of a PNG gradient strip.
const DEFAULT_PREVIEW_HEIGHT: u32 = 32;
/// Default log filter.
const DEFAULT_LOG_FILTER: &str = "info";

/// Defaults for the `tincture` CLI. Command-line flags take precedence.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// LUT samples for `bake` (`TINCTURE_LUT_SIZE`).
    pub lut_size: usize,
    /// Gradient strip height in pixels (`TINCTURE_PREVIEW_HEIGHT`).
    pub preview_height: u32,
    /// `tracing` filter directive (`TINCTURE_LOG`, then `RUST_LOG`).
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            lut_size: std::env::var("TINCTURE_LUT_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_LUT_SIZE),
            preview_height: std::env::var("TINCTURE_PREVIEW_HEIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&h| h > 0)
                .unwrap_or(DEFAULT_PREVIEW_HEIGHT),
            log_filter: std::env::var("TINCTURE_LOG")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
