//! # allowlist-client
//!
//! Client for the allow-list control endpoint exposed by the managed device.
//!
//! The server speaks a tiny, unauthenticated protocol: every operation is a
//! plain HTTP `GET` against `/cgi-bin/update_domain.sh` and every response is
//! a plain-text body.
//!
//! | Action | Query | Success body |
//! |--------|-------|--------------|
//! | list   | `action=list` | newline-separated domains |
//! | add    | `action=add&domain=<urlencoded>` | human readable confirmation |
//! | remove | `action=remove&domain=<urlencoded>` | human readable confirmation |
//!
//! Any non-2xx response is turned into [`ClientError::ServerError`] carrying
//! the body as the message.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use allowlist_client::{AllowlistServer, CgiAllowlistClient, CommandAction, ServerAddress};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CgiAllowlistClient::new();
//!     let address = ServerAddress::new("192.168.10.1", None);
//!
//!     for domain in client.list_domains(&address).await? {
//!         println!("{domain}");
//!     }
//!
//!     let reply = client
//!         .send_command(&address, CommandAction::Add, "example.com")
//!         .await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```
//!
//! ## Timeouts
//!
//! Every request runs under the client's request timeout (10 s unless
//! configured with [`CgiAllowlistClient::with_timeout`]); connectivity probes
//! use [`PROBE_TIMEOUT`]. An elapsed timer is reported as
//! [`ClientError::Timeout`]. There is no retry.

mod client;
mod error;
mod http_client;
mod traits;
mod types;

pub use client::{CgiAllowlistClient, DEFAULT_REQUEST_TIMEOUT, PROBE_TIMEOUT, parse_domain_list};
pub use error::{ClientError, Result};
pub use traits::AllowlistServer;
pub use types::{CGI_PATH, CommandAction, ServerAddress};
