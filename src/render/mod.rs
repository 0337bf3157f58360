pub mod axis;
pub mod marks;
pub mod tooltip;
pub mod transition;
