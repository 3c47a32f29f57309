//! # prosperity-ledger
//!
//! Revenue distribution ledger: zakat treasury, collaborator revenue
//! splits, yield pool, governance permissions, sovereign override, and the
//! append-only audit trail.
//!
//! The ledger is a single in-memory state machine. Every mutating operation
//! validates its inputs before touching any state, appends exactly one audit
//! entry on success, and runs to completion without suspension; callers are
//! expected to serialize mutations behind one exclusion boundary.
//!
//! ## Modules
//!
//! - [`split`] — Proportional share computation and remainder sweep
//! - [`audit`] — Bounded audit log and the external sink trait
//! - [`ledger`] — The [`Ledger`] state struct and its operations

pub mod audit;
pub mod ledger;
pub mod split;

pub use ledger::Ledger;

use prosperity_types::{Amount, BasisPoints, WEIGHT_SCALE_BPS};

/// Error types for ledger operations.
///
/// Every variant is a synchronous validation failure rejected before any
/// state mutation; none is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Amount is zero.
    #[error("amount must be positive")]
    InvalidAmount,

    /// Revenue weight outside the basis-point domain.
    #[error("revenue weight must be between 0 and {WEIGHT_SCALE_BPS} basis points, got {weight}")]
    InvalidWeight {
        /// The rejected weight.
        weight: BasisPoints,
    },

    /// Wallet already registered as a collaborator.
    #[error("collaborator already exists for wallet {wallet}")]
    DuplicateWallet {
        /// The duplicate wallet address.
        wallet: String,
    },

    /// No collaborator registered under the wallet.
    #[error("collaborator not found for wallet {wallet}")]
    CollaboratorNotFound {
        /// The unknown wallet address.
        wallet: String,
    },

    /// Override beneficiary is empty.
    #[error("override beneficiary must not be empty")]
    InvalidBeneficiary,

    /// Distribution exceeds the undistributed yield.
    #[error("insufficient pending distribution: requested {requested}, pending {pending}")]
    InsufficientPending {
        /// The requested distribution amount.
        requested: Amount,
        /// The pending distribution available.
        pending: Amount,
    },

    /// No permission record for the address.
    #[error("permission not found for address {address}")]
    PermissionNotFound {
        /// The unknown address.
        address: String,
    },

    /// Active weights commit more than the distribution amount.
    ///
    /// Possible when active weights sum above 10000 basis points; the
    /// distribution is rejected rather than produce a negative remainder.
    #[error("distribution over-committed: shares total {committed} exceeds amount {amount}")]
    OverCommitted {
        /// Sum of the computed collaborator shares.
        committed: Amount,
        /// The requested distribution amount.
        amount: Amount,
    },

    /// Arithmetic overflow.
    #[error("arithmetic overflow in share calculation")]
    Overflow,
}

/// Convenience result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
