//! Mission Service Client
//!
//! Thin GraphQL client for the Solar Rocket mission service: one transport
//! adapter plus the four mission operations (list, create, edit, delete).
//!
//! # Design
//!
//! The transport adapter ([`GraphqlClient`]) posts a query/mutation document
//! with its variables and decodes the `{data, errors}` envelope. Request
//! building and envelope decoding are plain functions, so every wire shape
//! is testable without a server. Each operation makes exactly one attempt;
//! there is no retry or backoff layer.
//!
//! # Usage
//!
//! ```ignore
//! use missions::{GraphqlClient, SortField, list_missions};
//!
//! let client = GraphqlClient::new("https://api.example.com/graphql")?;
//! let missions = list_missions(&client, SortField::Title, false).await?;
//! ```

pub mod client;
pub mod error;
pub mod model;
pub mod ops;

pub use client::GraphqlClient;
pub use error::{ApiError, ErrorKind};
pub use model::{Launch, LaunchDefaults, Mission, MissionInput, SortField};
pub use ops::{create_mission, delete_mission, list_missions, update_mission};
