pub mod aggregate;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod html;
pub mod output;
pub mod parse;
pub mod query;
pub mod relay;
pub mod transport;
