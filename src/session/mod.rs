pub mod question;
pub mod quiz;
pub mod section;
pub mod status;
pub mod timer;
