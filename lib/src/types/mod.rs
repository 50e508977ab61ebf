pub mod dashboard;
pub mod history;
pub mod permission;
pub mod toast;
pub mod wallet;
