mod calculation_table;
mod measurement_table;
mod plots;
mod tools;

pub use calculation_table::{CalculationTable, RowInputs};
pub use measurement_table::MeasurementTable;
pub use plots::{timestamp_millis, PlotPanel};
pub use tools::{ToolDrop, ToolPalette};
