pub mod catalog_panel;
pub mod inspector;
pub mod status_bar;
pub mod toolbar;
