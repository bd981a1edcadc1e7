// src/integrations/mod.rs
//
// External Integrations Module

pub mod api;

pub use api::{HttpRemoteClient, RemoteClient, SessionToken, StaticToken, TokenProvider};
