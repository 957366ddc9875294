//! Adapters for the transport, clock and clipboard ports.

mod clipboard;
mod reqwest_client;
mod system_clock;

pub use clipboard::ProcessClipboard;
pub use reqwest_client::ReqwestHttpClient;
pub use system_clock::SystemClock;
