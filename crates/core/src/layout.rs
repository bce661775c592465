//! Layout selection from the number of arguments on a slide.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual arrangement of a slide's arguments section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// A single argument, shown as one full-width block.
    ProcessFlow,
    /// Two arguments side by side.
    TwoColumns,
    /// Three or more arguments on a three-column grid.
    ThreeColumns,
}

impl LayoutVariant {
    /// Pick the layout for a slide with `count` argument entries.
    ///
    /// `0` never occurs for a valid slide but resolves to three columns.
    pub fn for_argument_count(count: usize) -> Self {
        match count {
            1 => Self::ProcessFlow,
            2 => Self::TwoColumns,
            _ => Self::ThreeColumns,
        }
    }

    /// Number of grid columns used by this layout.
    pub fn columns(self) -> usize {
        match self {
            Self::ProcessFlow => 1,
            Self::TwoColumns => 2,
            Self::ThreeColumns => 3,
        }
    }

    /// Stable identifier, also used as a CSS class.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProcessFlow => "process-flow",
            Self::TwoColumns => "two-columns",
            Self::ThreeColumns => "three-columns",
        }
    }

    /// Human-readable name shown next to the preview.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ProcessFlow => "流程布局",
            Self::TwoColumns => "双栏布局",
            Self::ThreeColumns => "三列布局",
        }
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`LayoutVariant::for_argument_count`].
pub fn select_layout(count: usize) -> LayoutVariant {
    LayoutVariant::for_argument_count(count)
}
