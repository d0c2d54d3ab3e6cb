use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance for {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: String,
        needed: u128,
        available: u128,
    },

    #[error("treasury reserve breached: requested {requested}, unlocked {unlocked}")]
    TreasuryReserveBreached { requested: u128, unlocked: u128 },

    #[error("cannot release {requested} from a reserve of {locked}")]
    ReserveUnderflow { requested: u128, locked: u128 },

    #[error("the zero address cannot hold or send tokens")]
    ZeroAddress,

    #[error("arithmetic overflow in ledger accounting")]
    Overflow,

    #[error("transfer fee {0} bps exceeds 100%")]
    InvalidFee(u32),
}
