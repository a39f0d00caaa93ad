//! Error types for decoder configuration.
//!
//! Malformed *input* never errors; the pipeline degrades gracefully
//! instead. Only malformed configuration fails, and only at startup.

/// Errors surfaced when constructing a decoder.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Non-positive or non-finite time-unit guess.
    #[error("time unit must be positive and finite, got {value}")]
    TimeUnit { value: f64 },

    /// Adaptation weight outside (0, 1].
    #[error("adaptation rate must be in (0, 1], got {value}")]
    AdaptRate { value: f64 },

    /// Non-positive or non-finite sample clock rate.
    #[error("sample rate must be positive and finite, got {value}")]
    SampleRate { value: f64 },
}
