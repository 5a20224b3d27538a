//! Topic categories and their presentation constants

use serde::{Deserialize, Serialize};

/// Topic label assigned to every retained publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "HPC")]
    Hpc,
    #[serde(rename = "Quantum")]
    Quantum,
    #[serde(rename = "Architecture")]
    Architecture,
    #[serde(rename = "Programming Model")]
    ProgrammingModel,
    #[serde(rename = "Edge/IoT")]
    EdgeIot,
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "Applications")]
    Applications,
}

impl Category {
    /// All categories, in the order the filter bar displays them.
    pub const DISPLAY_ORDER: [Category; 7] = [
        Category::Hpc,
        Category::Quantum,
        Category::Architecture,
        Category::ProgrammingModel,
        Category::EdgeIot,
        Category::Ai,
        Category::Applications,
    ];

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Hpc => "HPC",
            Category::Quantum => "Quantum",
            Category::Architecture => "Architecture",
            Category::ProgrammingModel => "Programming Model",
            Category::EdgeIot => "Edge/IoT",
            Category::Ai => "AI",
            Category::Applications => "Applications",
        }
    }

    /// Tie-break rank when several topic rules hit; lower wins.
    ///
    /// Kept as its own table, independent of the order the rules are
    /// declared and evaluated in.
    pub fn priority(self) -> usize {
        match self {
            Category::Quantum => 0,
            Category::ProgrammingModel => 1,
            Category::EdgeIot => 2,
            Category::Ai => 3,
            Category::Architecture => 4,
            Category::Applications => 5,
            Category::Hpc => 6,
        }
    }

    /// Lower-case slug used in CSS class names and element ids.
    pub fn css_class(self) -> &'static str {
        match self {
            Category::Hpc => "hpc",
            Category::Quantum => "quantum",
            Category::Architecture => "architecture",
            Category::ProgrammingModel => "programming-model",
            Category::EdgeIot => "edge-iot",
            Category::Ai => "ai",
            Category::Applications => "applications",
        }
    }

    /// Accent color for filter buttons and card borders.
    pub fn color(self) -> &'static str {
        match self {
            Category::Hpc => "#0EA5E9",
            Category::Quantum => "#7C3AED",
            Category::Architecture => "#F59E0B",
            Category::ProgrammingModel => "#22C55E",
            Category::EdgeIot => "#14B8A6",
            Category::Ai => "#EF4444",
            Category::Applications => "#DB2777",
        }
    }

    /// Background tint for cards.
    pub fn tint(self) -> &'static str {
        match self {
            Category::Hpc => "#E0F2FE",
            Category::Quantum => "#F3E8FF",
            Category::Architecture => "#FEF3C7",
            Category::ProgrammingModel => "#DCFCE7",
            Category::EdgeIot => "#CCFBF1",
            Category::Ai => "#FEE2E2",
            Category::Applications => "#FCE7F3",
        }
    }
}
