mod logic;
mod ui;

use crate::wood::{Tool, WoodType};

/// Tracks the drag of a measurement tool from the palette onto one of the
/// wood samples.
#[derive(Debug, Default)]
pub struct ToolPalette {
    dragged: Option<Tool>,
    highlighted: Option<WoodType>,
}

/// A tool that was released over a wood sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolDrop {
    pub tool: Tool,
    pub wood: WoodType,
}
