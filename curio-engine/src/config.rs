//! Engine configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | CURIO_LABEL_MAX_CHARS | 40 | grouped chip label limit before "..." |
//! | CURIO_FALLBACK_COLOR | #9E9E9E | chip color for tags without a template color |
//! | CURIO_OVERFLOW_COLOR | #757575 | color of the "+N more" chip |
//! | CURIO_PLACEHOLDER | No associated tags | label of the empty-state chip |

pub const DEFAULT_MAX_LABEL_CHARS: usize = 40;
pub const DEFAULT_FALLBACK_COLOR: &str = "#9E9E9E";
pub const DEFAULT_OVERFLOW_COLOR: &str = "#757575";
pub const DEFAULT_PLACEHOLDER: &str = "No associated tags";

/// Chip rendering settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Grouped labels longer than this are cut and suffixed with "..."
    pub max_label_chars: usize,
    pub fallback_color: String,
    pub overflow_color: String,
    pub placeholder_label: String,
}

impl RenderConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_label_chars: var("CURIO_LABEL_MAX_CHARS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_label_chars),
            fallback_color: var("CURIO_FALLBACK_COLOR")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.fallback_color),
            overflow_color: var("CURIO_OVERFLOW_COLOR")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.overflow_color),
            placeholder_label: var("CURIO_PLACEHOLDER")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.placeholder_label),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_label_chars: DEFAULT_MAX_LABEL_CHARS,
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
            overflow_color: DEFAULT_OVERFLOW_COLOR.to_string(),
            placeholder_label: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// All engine settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub render: RenderConfig,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self {
            render: RenderConfig::from_env(),
        }
    }
}
