//! Fundamental types for Civitas.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! addresses, block heights, governance parameters with their safety bands,
//! token metadata, network ids, and the common error type.

pub mod address;
pub mod error;
pub mod network;
pub mod params;
pub mod time;

pub use address::Address;
pub use error::CivitasError;
pub use network::NetworkId;
pub use params::{GovernanceParams, TokenMetadata, BPS_DENOMINATOR};
pub use time::BlockHeight;
