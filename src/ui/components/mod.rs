pub mod help;
pub mod question_panel;
pub mod question_view;
pub mod tab_bar;
