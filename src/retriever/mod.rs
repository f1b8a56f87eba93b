pub mod error;
pub(crate) mod fallback;
pub mod historical;
pub mod progress;
