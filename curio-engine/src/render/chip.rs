//! Chip types produced by the renderer

use crate::config::RenderConfig;
use serde::{Deserialize, Serialize};

/// What a chip stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipKind {
    /// A tag value
    Tag,
    /// The trailing "+N more" chip
    Overflow,
    /// Empty-state chip shown when nothing has a value
    Placeholder,
}

/// One colored label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub label: String,
    pub color: String,
    pub kind: ChipKind,
    /// Resolved key of the tag behind a [`ChipKind::Tag`] chip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Chip {
    pub fn tag(label: impl Into<String>, color: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            kind: ChipKind::Tag,
            key: Some(key.into()),
        }
    }

    pub fn overflow(elided: usize, config: &RenderConfig) -> Self {
        Self {
            label: format!("+{} more", elided),
            color: config.overflow_color.clone(),
            kind: ChipKind::Overflow,
            key: None,
        }
    }

    pub fn placeholder(config: &RenderConfig) -> Self {
        Self {
            label: config.placeholder_label.clone(),
            color: config.fallback_color.clone(),
            kind: ChipKind::Placeholder,
            key: None,
        }
    }

    pub fn is_tag(&self) -> bool {
        self.kind == ChipKind::Tag
    }
}

/// One chip per tag, or one chip per scalar value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// `"{title}: {value}"` per tag
    #[default]
    Grouped,
    /// Bare value per list element or scalar
    Exploded,
}

/// Maximum number of tag chips to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChipLimit {
    #[default]
    Unlimited,
    Max(usize),
}

impl From<Option<usize>> for ChipLimit {
    fn from(max: Option<usize>) -> Self {
        max.map_or(Self::Unlimited, Self::Max)
    }
}

/// Per-call rendering choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub limit: ChipLimit,
    /// Emit the placeholder chip when there is nothing to show
    pub placeholder: bool,
    /// Cut grouped labels at the configured length
    pub truncate: bool,
    /// Keep only the first grouped chip per resolved key
    pub dedupe_keys: bool,
}

impl RenderOptions {
    pub fn grouped() -> Self {
        Self::default()
    }

    pub fn exploded() -> Self {
        Self {
            mode: RenderMode::Exploded,
            ..Self::default()
        }
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.limit = ChipLimit::Max(max);
        self
    }

    pub fn with_limit(mut self, limit: ChipLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }

    pub fn untruncated(mut self) -> Self {
        self.truncate = false;
        self
    }

    pub fn keep_duplicate_keys(mut self) -> Self {
        self.dedupe_keys = false;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Grouped,
            limit: ChipLimit::Unlimited,
            placeholder: false,
            truncate: true,
            dedupe_keys: true,
        }
    }
}

/// Rendered chips plus the counts behind them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipSummary {
    /// Tag chips, then the overflow or placeholder chip if any
    pub chips: Vec<Chip>,
    /// Tag chips produced before the limit was applied
    pub total: usize,
    /// Tag chips cut by the limit
    pub elided: usize,
}

impl ChipSummary {
    pub fn tag_chips(&self) -> impl Iterator<Item = &Chip> {
        self.chips.iter().filter(|chip| chip.is_tag())
    }

    pub fn overflow(&self) -> Option<&Chip> {
        self.chips.iter().find(|chip| chip.kind == ChipKind::Overflow)
    }

    pub fn placeholder(&self) -> Option<&Chip> {
        self.chips
            .iter()
            .find(|chip| chip.kind == ChipKind::Placeholder)
    }

    /// Nothing had a displayable value
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn labels(&self) -> Vec<&str> {
        self.chips.iter().map(|chip| chip.label.as_str()).collect()
    }
}
