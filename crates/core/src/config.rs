use std::env;

use serde::{Deserialize, Serialize};

/// Default search horizon for the occurrence cursor, in years.
///
/// Wide enough for a Feb 29 schedule pinned to a weekday, whose matches can be
/// 40 years apart across a skipped century leap day.
pub const DEFAULT_HORIZON_YEARS: u32 = 50;

/// Days scanned before the reference day by the time-slot aggregator.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

// ── Scan config ───────────────────────────────────────────────

/// Bounds for occurrence enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Active profile name (empty = default).
    #[serde(default)]
    pub profile: String,
    /// How far past its seed a cursor searches before giving up.
    pub horizon_years: u32,
    /// Days before the reference day that the time-slot aggregator replays.
    pub lookback_days: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            profile: String::new(),
            horizon_years: DEFAULT_HORIZON_YEARS,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl ScanConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `CRONSCOPE_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("CRONSCOPE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            horizon_years: profiled_env_u32(p, "CRONSCOPE_HORIZON_YEARS", DEFAULT_HORIZON_YEARS)
                .max(1),
            lookback_days: profiled_env_u32(p, "CRONSCOPE_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS),
        }
    }

    pub fn with_horizon_years(mut self, years: u32) -> Self {
        self.horizon_years = years.max(1);
        self
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  scan:        horizon_years={}, lookback_days={}", self.horizon_years, self.lookback_days);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = ScanConfig::default();
        assert_eq!(config.horizon_years, DEFAULT_HORIZON_YEARS);
        assert_eq!(config.lookback_days, DEFAULT_LOOKBACK_DAYS);
        assert_eq!(config.profile_label(), "default");
    }

    #[test]
    fn profiled_keys_take_precedence() {
        env::set_var("CSTEST_CRONSCOPE_HORIZON_YEARS", "12");
        env::set_var("CRONSCOPE_LOOKBACK_DAYS", "3");
        let config = ScanConfig::for_profile("cstest");
        assert_eq!(config.profile, "CSTEST");
        assert_eq!(config.horizon_years, 12);
        assert_eq!(config.lookback_days, 3);
        env::remove_var("CSTEST_CRONSCOPE_HORIZON_YEARS");
        env::remove_var("CRONSCOPE_LOOKBACK_DAYS");
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        env::set_var("JUNK_CRONSCOPE_HORIZON_YEARS", "forever");
        let config = ScanConfig::for_profile("junk");
        assert_eq!(config.horizon_years, DEFAULT_HORIZON_YEARS);
        env::remove_var("JUNK_CRONSCOPE_HORIZON_YEARS");
    }

    #[test]
    fn horizon_is_never_zero() {
        assert_eq!(ScanConfig::default().with_horizon_years(0).horizon_years, 1);
    }
}
