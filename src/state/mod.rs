pub mod app_state;
pub mod chart;
pub mod field;
pub mod layout;
pub mod record;
pub mod theme;
