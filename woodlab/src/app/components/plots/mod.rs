mod logic;
mod ui;

use app_core::frontend::UIParameter;

use crate::wood::Property;

pub use logic::timestamp_millis;

/// The three charts rendered by the server, one per property.
pub struct PlotPanel {
    images: [PlotImage; 3],
}

pub struct PlotImage {
    property: Property,
    /// URL the image was (or is being) loaded from.
    source: Option<String>,
    image: UIParameter<Option<Result<egui::ColorImage, String>>>,
    texture: Option<egui::TextureHandle>,
}

impl PlotImage {
    fn new(property: Property) -> Self {
        Self {
            property,
            source: None,
            image: UIParameter::new(None),
            texture: None,
        }
    }
}

impl Default for PlotPanel {
    fn default() -> Self {
        Self {
            images: Property::ALL.map(PlotImage::new),
        }
    }
}
