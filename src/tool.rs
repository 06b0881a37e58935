use std::str::FromStr;

use crate::error::SelectionError;

/// Toolbar controls are identified as `tool-<name>`.
pub const CONTROL_PREFIX: &str = "tool-";

/// The shape a new gesture will create.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Circle,
    #[default]
    Rectangle,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::Circle, Tool::Rectangle];

    pub fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Circle => "⏺",
            Self::Rectangle => "⏹",
        }
    }

    pub fn control_id(self) -> String {
        format!("{CONTROL_PREFIX}{}", self.name())
    }

    /// Resolve a toolbar control id such as `tool-circle`.
    pub fn from_control_id(id: &str) -> Result<Self, SelectionError> {
        id.strip_prefix(CONTROL_PREFIX)
            .ok_or_else(|| SelectionError::UnknownTool(id.to_owned()))?
            .parse()
    }
}

impl FromStr for Tool {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(Self::Circle),
            "rectangle" => Ok(Self::Rectangle),
            other => Err(SelectionError::UnknownTool(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
