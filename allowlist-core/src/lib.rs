//! Domain allow-list keeper core library
//!
//! Provides the business logic behind the allow-list front end:
//! - Settings Store (server address, validated and persisted)
//! - Domain List Synchronizer (cache with a one hour staleness window)
//! - Command Dispatcher (add/remove with optimistic cache updates)
//! - `PopupSession`, the per-view state that ties them together
//!
//! Storage, time and rendering are abstracted through traits so the same
//! logic runs against a JSON file, an in-memory map, a terminal or a test
//! double.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{PopupSession, ServiceContext};
pub use traits::{Clock, KeyValueStore, PopupView};
