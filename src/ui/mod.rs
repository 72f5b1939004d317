pub mod charts;
pub mod drill_panel;
pub mod executives;
pub mod main_panel;
pub mod summary;

pub use drill_panel::DrillPanelState;
pub use main_panel::show_main_panel;
