pub mod components;
pub mod layout;
pub mod line_input;
pub mod section_view;
pub mod theme;
