//! Network transport for gateway requests.

mod http;
mod traits;

pub use http::HttpTransport;
pub use traits::Transport;
