use crate::wood::{Tool, WoodType};

use super::ToolDrop;

impl super::ToolPalette {
    pub fn start_drag(&mut self, tool: Tool) {
        if self.dragged != Some(tool) {
            log::debug!("started dragging {tool}");
        }
        self.dragged = Some(tool);
    }

    /// A tool hovers over `wood`, which makes it a valid drop target.
    pub fn drag_over(&mut self, wood: &WoodType) {
        if self.highlighted.as_ref() != Some(wood) {
            self.highlighted = Some(wood.clone());
        }
    }

    pub fn drag_left(&mut self) {
        self.highlighted = None;
    }

    /// The drag ended without a drop.
    pub fn drag_ended(&mut self) {
        self.dragged = None;
        self.highlighted = None;
    }

    /// `payload` was released over `wood`.
    pub fn drop_on(&mut self, wood: &WoodType, payload: Tool) -> ToolDrop {
        self.drag_ended();
        log::debug!("dropped {payload} on {wood}");
        ToolDrop {
            tool: payload,
            wood: wood.clone(),
        }
    }

    pub fn dragged(&self) -> Option<Tool> {
        self.dragged
    }

    pub fn is_highlighted(&self, wood: &WoodType) -> bool {
        self.highlighted.as_ref() == Some(wood)
    }
}

#[cfg(test)]
mod tests {
    use super::super::ToolPalette;
    use super::*;

    #[test]
    fn test_drop_clears_highlight() {
        let mut palette = ToolPalette::default();
        let oak = WoodType::from("Oak");

        palette.start_drag(Tool::PorosityMeter);
        palette.drag_over(&oak);
        assert!(palette.is_highlighted(&oak));
        assert_eq!(palette.dragged(), Some(Tool::PorosityMeter));

        let dropped = palette.drop_on(&oak, Tool::PorosityMeter);
        assert_eq!(
            dropped,
            ToolDrop {
                tool: Tool::PorosityMeter,
                wood: oak.clone()
            }
        );
        assert!(!palette.is_highlighted(&oak));
        assert_eq!(palette.dragged(), None);
    }

    #[test]
    fn test_highlight_follows_pointer() {
        let mut palette = ToolPalette::default();
        let (oak, pine) = (WoodType::from("Oak"), WoodType::from("Pine"));
        palette.start_drag(Tool::DensityMeter);
        palette.drag_over(&oak);
        palette.drag_over(&pine);
        assert!(!palette.is_highlighted(&oak));
        assert!(palette.is_highlighted(&pine));
        palette.drag_left();
        assert!(!palette.is_highlighted(&pine));
    }
}
