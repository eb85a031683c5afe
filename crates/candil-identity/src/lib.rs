#![doc = include_str!("../README.md")]

mod api;
mod client;
mod config;

pub use client::IdentityApiClient;
pub use config::IdentityConfig;
