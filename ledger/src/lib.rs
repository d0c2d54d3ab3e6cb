//! Fungible-token ledger consumed by the governance engine.
//!
//! Balances, total supply, mint and burn, and a transfer path that splits a
//! configurable fee off to the treasury. The treasury can reserve part of its
//! balance for airdrop claims; debits never dip into that reserve.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::{TokenLedger, TransferReceipt};
