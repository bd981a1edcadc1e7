pub mod auth;
pub mod client;

pub use auth::{SessionToken, StaticToken, TokenProvider};
pub use client::{HttpRemoteClient, RemoteClient};

#[cfg(test)]
pub use client::MockRemoteClient;
