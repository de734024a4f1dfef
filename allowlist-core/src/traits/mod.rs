//! Storage, time and presentation abstraction trait definitions

mod clock;
mod key_value_store;
mod view;

pub use clock::{Clock, SystemClock};
pub use key_value_store::{InMemoryKeyValueStore, KeyValueStore};
pub use view::PopupView;

// Re-export the server abstraction
pub use allowlist_client::AllowlistServer;
