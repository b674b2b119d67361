pub const CONFIG_PATH_ENV: &str = "DEGENERATION_CONFIG_PATH";
pub const DEFAULT_NGRAM_SIZE: usize = 3;
pub const DEFAULT_DISTRIBUTION_TOP_K: usize = 25;
pub const DEFAULT_OVERLAP_TOP_K: usize = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Bucket label for tokens merged out of a truncated distribution
pub const OTHER_TOKENS_LABEL: &str = "其他";

pub const LOW_SEVERITY_CEILING: f64 = 0.3;
pub const MODERATE_SEVERITY_CEILING: f64 = 0.6;
