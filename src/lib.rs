pub mod client;
pub mod config;
pub mod models;
pub mod providers;
pub mod transport;
pub mod ui;

pub use client::ChatClient;
pub use config::Config;
pub use models::{Error, Result, DEFAULT_ERROR_PREFIX};
pub use providers::{CozeProvider, DeepSeekProvider, Provider};
pub use transport::{HttpReply, HttpTransport, Transport};
