pub mod types;

pub use types::dashboard;
pub use types::history;
pub use types::permission;
pub use types::toast;
pub use types::wallet;
