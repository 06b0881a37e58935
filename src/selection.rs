use crate::error::SelectionError;
use crate::shape::ColorValue;
use crate::tool::Tool;

/// What a new gesture reads when it starts. Taken once on pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub tool: Tool,
    pub color: ColorValue,
}

/// Owns the active tool and fill color. The toolbar is the only writer.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    tool: Tool,
    color: ColorValue,
}

impl SelectionState {
    pub fn new(tool: Tool, color: ColorValue) -> Self {
        Self { tool, color }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> &ColorValue {
        &self.color
    }

    /// Exactly one tool is active, so this is also the toolbar's highlight.
    pub fn is_active(&self, tool: Tool) -> bool {
        self.tool == tool
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::info!("Tool selected: {}", tool);
        }
        self.tool = tool;
    }

    /// Select the tool named by a toolbar control id (`tool-<name>`).
    ///
    /// An unknown id leaves the state untouched.
    pub fn select_control(&mut self, control_id: &str) -> Result<Tool, SelectionError> {
        match Tool::from_control_id(control_id) {
            Ok(tool) => {
                self.select_tool(tool);
                Ok(tool)
            }
            Err(err) => {
                log::warn!("Ignoring tool selection: {}", err);
                Err(err)
            }
        }
    }

    pub fn set_color(&mut self, color: ColorValue) {
        log::debug!("Color selected: {}", color);
        self.color = color;
    }

    pub fn snapshot(&self) -> Selection {
        Selection {
            tool: self.tool,
            color: self.color.clone(),
        }
    }
}
