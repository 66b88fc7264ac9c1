use thiserror::Error;

/// Rejected tunables. Values are reported as given, never clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("visible window must hold at least one card")]
    EmptyVisibleWindow,

    #[error("replenish threshold ({min_threshold}) exceeds the visible window ({visible_count})")]
    ThresholdExceedsWindow {
        min_threshold: usize,
        visible_count: usize,
    },

    #[error("{name} must be a finite non-negative number, got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("overlay fade must end after it starts (start {fade_start}, end {fade_end})")]
    InvertedFade { fade_start: f32, fade_end: f32 },

    #[error("overlay max opacity must be within 0..=1, got {0}")]
    OpacityOutOfRange(f32),

    #[error("grabbed scale must be within (0, 1), got {0}")]
    GrabbedScaleOutOfRange(f32),

    #[error("viewport must have a positive size, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error(
        "{name} spring needs positive stiffness and mass and non-negative damping \
         (stiffness {stiffness}, damping {damping}, mass {mass})"
    )]
    InvalidSpring {
        name: &'static str,
        stiffness: f32,
        damping: f32,
        mass: f32,
    },
}
