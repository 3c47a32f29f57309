//! Proportional share computation.
//!
//! Each active collaborator with a positive weight receives
//! `floor(amount * weight / 10000)`; whatever the floors leave behind is
//! swept into a final line item for the sovereign beneficiary, so the line
//! items of a successful plan always sum to the amount exactly.
//!
//! Weights are per-collaborator and the ledger does not constrain their
//! sum, so a table whose active weights exceed 10000 basis points can
//! commit more than the amount being distributed. That case is rejected as
//! [`LedgerError::OverCommitted`] instead of producing a negative
//! remainder.

use prosperity_types::collaborator::Collaborator;
use prosperity_types::yields::DistributionLine;
use prosperity_types::{Amount, BasisPoints, WEIGHT_SCALE_BPS};

use crate::{LedgerError, Result};

/// Compute one collaborator's floored share of an amount.
///
/// # Errors
///
/// - [`LedgerError::Overflow`] on arithmetic overflow
pub fn share_of(amount: Amount, weight_bps: BasisPoints) -> Result<Amount> {
    let share = amount
        .checked_mul(u64::from(weight_bps))
        .ok_or(LedgerError::Overflow)?
        / u64::from(WEIGHT_SCALE_BPS);
    Ok(share)
}

/// Plan a proportional distribution over the collaborator table.
///
/// Collaborators are visited in insertion order. Inactive collaborators,
/// zero weights, and shares that floor to zero produce no line item. The
/// final line credits the remainder to the sovereign beneficiary.
///
/// # Errors
///
/// - [`LedgerError::OverCommitted`] if the computed shares exceed `amount`
/// - [`LedgerError::Overflow`] on arithmetic overflow
pub fn plan(
    amount: Amount,
    collaborators: &[Collaborator],
    sovereign_name: &str,
    sovereign_wallet: &str,
) -> Result<Vec<DistributionLine>> {
    let mut lines = Vec::new();
    let mut committed: Amount = 0;

    for collab in collaborators {
        if !collab.is_active || collab.revenue_weight == 0 {
            continue;
        }
        let share = share_of(amount, collab.revenue_weight)?;
        if share == 0 {
            continue;
        }
        committed = committed.checked_add(share).ok_or(LedgerError::Overflow)?;
        lines.push(DistributionLine {
            collaborator: collab.name.clone(),
            wallet: collab.wallet.clone(),
            amount: share,
            weight: Some(collab.revenue_weight),
        });
    }

    if committed > amount {
        return Err(LedgerError::OverCommitted { committed, amount });
    }

    lines.push(DistributionLine {
        collaborator: sovereign_name.to_string(),
        wallet: sovereign_wallet.to_string(),
        amount: amount - committed,
        weight: None,
    });

    Ok(lines)
}
