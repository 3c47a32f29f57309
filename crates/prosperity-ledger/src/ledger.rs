//! The [`Ledger`] state struct and its operations.
//!
//! One `Ledger` instance owns all governance state: treasury, collaborator
//! table, yield pool, permission table, override, and audit log. Operations
//! validate before mutating, so a rejected call leaves every field
//! untouched. Callers pass the current time and the acting identity
//! explicitly; the ledger performs no I/O and reads no clocks.

use std::collections::VecDeque;

use prosperity_types::audit::{AuditAction, AuditEntry};
use prosperity_types::collaborator::Collaborator;
use prosperity_types::overrides::OverrideState;
use prosperity_types::permissions::{Permission, Role};
use prosperity_types::reports::{
    Analytics, CollaboratorSummary, Overview, TopPerformer, TreasuryAnalytics, YieldSummary,
};
use prosperity_types::treasury::{ContributionRecord, TreasuryAccount};
use prosperity_types::yields::{
    DistributionLine, DistributionReport, YieldPool, YieldRecord, YieldSource,
};
use prosperity_types::{
    Amount, BasisPoints, Timestamp, OVERVIEW_ACTIVITY_WINDOW, RECENT_WINDOW, TOP_PERFORMER_COUNT,
    WEIGHT_SCALE_BPS,
};

use crate::audit::{AuditLog, AuditSink};
use crate::{split, LedgerError, Result};

/// Default display name for the sovereign remainder beneficiary.
pub const DEFAULT_SOVEREIGN_NAME: &str = "Sovereign";

/// Default wallet for the sovereign remainder beneficiary.
pub const DEFAULT_SOVEREIGN_WALLET: &str = "0xSovereign";

/// Audit trail query result.
#[derive(Clone, Debug)]
pub struct AuditTrailView {
    /// Matching entries, newest first.
    pub logs: Vec<AuditEntry>,
    /// Total retained entries (before filtering).
    pub total: usize,
    /// Distinct actions present in the retained log.
    pub actions: Vec<AuditAction>,
}

/// The revenue distribution ledger.
pub struct Ledger {
    treasury: TreasuryAccount,
    /// Newest first, capped at [`RECENT_WINDOW`].
    recent_contributions: VecDeque<ContributionRecord>,
    /// Insertion order; wallets are unique.
    collaborators: Vec<Collaborator>,
    next_collaborator_id: u64,
    pool: YieldPool,
    sources: Vec<YieldSource>,
    /// Newest first, capped at [`RECENT_WINDOW`].
    recent_yields: VecDeque<YieldRecord>,
    permissions: Vec<Permission>,
    override_state: OverrideState,
    audit: AuditLog,
    sovereign_name: String,
    sovereign_wallet: String,
}

impl Ledger {
    /// Create an empty ledger with the given sovereign beneficiary.
    pub fn new(sovereign_name: impl Into<String>, sovereign_wallet: impl Into<String>) -> Self {
        Self {
            treasury: TreasuryAccount::default(),
            recent_contributions: VecDeque::new(),
            collaborators: Vec::new(),
            next_collaborator_id: 0,
            pool: YieldPool::default(),
            sources: Vec::new(),
            recent_yields: VecDeque::new(),
            permissions: Vec::new(),
            override_state: OverrideState::inactive(),
            audit: AuditLog::new(),
            sovereign_name: sovereign_name.into(),
            sovereign_wallet: sovereign_wallet.into(),
        }
    }

    /// Attach an external audit sink. Replaces any previous sink.
    pub fn set_audit_sink(&mut self, sink: Box<dyn AuditSink>) {
        self.audit.set_sink(sink);
    }

    // ---- Treasury ----

    /// Record a treasury contribution.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if `amount` is zero
    /// - [`LedgerError::Overflow`] if a treasury accumulator would overflow
    pub fn contribute(
        &mut self,
        amount: Amount,
        source: &str,
        contributor: &str,
        actor: &str,
        now: Timestamp,
    ) -> Result<ContributionRecord> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let balance = self
            .treasury
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let total_contributions = self
            .treasury
            .total_contributions
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        let record = ContributionRecord {
            amount,
            timestamp: now,
            contributor: contributor.to_string(),
            source: source.to_string(),
        };

        self.treasury.balance = balance;
        self.treasury.total_contributions = total_contributions;
        self.treasury.contribution_count += 1;
        self.recent_contributions.push_front(record.clone());
        if self.recent_contributions.len() > RECENT_WINDOW {
            self.recent_contributions.pop_back();
        }

        self.audit.append(
            now,
            actor,
            AuditAction::ZakatContributed,
            format!("Amount: {amount} Source: {source}"),
        );
        tracing::info!(amount, source, contributor, "zakat contribution recorded");

        Ok(record)
    }

    /// Current treasury aggregates.
    pub fn treasury(&self) -> &TreasuryAccount {
        &self.treasury
    }

    /// Most recent contributions, newest first.
    pub fn recent_contributions(&self, limit: usize) -> Vec<ContributionRecord> {
        self.recent_contributions.iter().take(limit).cloned().collect()
    }

    // ---- Collaborators ----

    /// Register a new collaborator with `is_active = true` and zero earnings.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidWeight`] if `weight` exceeds 10000 basis points
    /// - [`LedgerError::DuplicateWallet`] if the wallet is already registered
    pub fn add_collaborator(
        &mut self,
        name: &str,
        wallet: &str,
        weight: BasisPoints,
        role: &str,
        actor: &str,
        now: Timestamp,
    ) -> Result<Collaborator> {
        if weight > WEIGHT_SCALE_BPS {
            return Err(LedgerError::InvalidWeight { weight });
        }
        if self.collaborators.iter().any(|c| c.wallet == wallet) {
            return Err(LedgerError::DuplicateWallet {
                wallet: wallet.to_string(),
            });
        }

        self.next_collaborator_id += 1;
        let collaborator = Collaborator {
            id: self.next_collaborator_id,
            name: name.to_string(),
            wallet: wallet.to_string(),
            role: role.to_string(),
            revenue_weight: weight,
            is_active: true,
            total_earned: 0,
            last_distribution: now,
        };
        self.collaborators.push(collaborator.clone());

        self.audit.append(
            now,
            actor,
            AuditAction::CollaboratorAdded,
            format!("{name} added with {}% weight", f64::from(weight) / 100.0),
        );
        tracing::info!(name, wallet, weight, "collaborator added");

        Ok(collaborator)
    }

    /// Change a collaborator's revenue weight.
    ///
    /// Returns the updated collaborator plus the old and new weights.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidWeight`] if `new_weight` exceeds 10000 basis points
    /// - [`LedgerError::CollaboratorNotFound`] if the wallet is unknown
    pub fn set_weight(
        &mut self,
        wallet: &str,
        new_weight: BasisPoints,
        actor: &str,
        now: Timestamp,
    ) -> Result<(Collaborator, BasisPoints, BasisPoints)> {
        if new_weight > WEIGHT_SCALE_BPS {
            return Err(LedgerError::InvalidWeight { weight: new_weight });
        }
        let collab = self
            .collaborators
            .iter_mut()
            .find(|c| c.wallet == wallet)
            .ok_or_else(|| LedgerError::CollaboratorNotFound {
                wallet: wallet.to_string(),
            })?;

        let old_weight = collab.revenue_weight;
        collab.revenue_weight = new_weight;
        let updated = collab.clone();

        self.audit.append(
            now,
            actor,
            AuditAction::WeightAdjusted,
            format!(
                "{}: {}% -> {}%",
                updated.name,
                f64::from(old_weight) / 100.0,
                f64::from(new_weight) / 100.0
            ),
        );
        tracing::info!(wallet, old_weight, new_weight, "revenue weight adjusted");

        Ok((updated, old_weight, new_weight))
    }

    /// Activate or deactivate a collaborator. Idempotent if unchanged.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::CollaboratorNotFound`] if the wallet is unknown
    pub fn set_active_status(
        &mut self,
        wallet: &str,
        is_active: bool,
        actor: &str,
        now: Timestamp,
    ) -> Result<Collaborator> {
        let collab = self
            .collaborators
            .iter_mut()
            .find(|c| c.wallet == wallet)
            .ok_or_else(|| LedgerError::CollaboratorNotFound {
                wallet: wallet.to_string(),
            })?;

        collab.is_active = is_active;
        let updated = collab.clone();

        self.audit.append(
            now,
            actor,
            AuditAction::CollaboratorStatusChanged,
            format!(
                "{} {}",
                updated.name,
                if is_active { "activated" } else { "deactivated" }
            ),
        );
        tracing::info!(wallet, is_active, "collaborator status changed");

        Ok(updated)
    }

    /// Collaborators in insertion order, optionally active only.
    pub fn collaborators(&self, active_only: bool) -> Vec<Collaborator> {
        self.collaborators
            .iter()
            .filter(|c| !active_only || c.is_active)
            .cloned()
            .collect()
    }

    /// Look up a single collaborator by wallet.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::CollaboratorNotFound`] if the wallet is unknown
    pub fn collaborator(&self, wallet: &str) -> Result<&Collaborator> {
        self.collaborators
            .iter()
            .find(|c| c.wallet == wallet)
            .ok_or_else(|| LedgerError::CollaboratorNotFound {
                wallet: wallet.to_string(),
            })
    }

    /// Aggregates over the collaborator table.
    pub fn collaborator_summary(&self) -> CollaboratorSummary {
        CollaboratorSummary {
            total: self.collaborators.len(),
            active: self.collaborators.iter().filter(|c| c.is_active).count(),
            total_weight_allocated: self
                .collaborators
                .iter()
                .filter(|c| c.is_active)
                .map(|c| c.revenue_weight)
                .sum(),
            total_earned_all_time: self.collaborators.iter().map(|c| c.total_earned).sum(),
        }
    }

    // ---- Yields ----

    /// Record collected yield into the pool.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if `amount` is zero
    /// - [`LedgerError::Overflow`] if a pool accumulator would overflow
    pub fn record_yield(
        &mut self,
        amount: Amount,
        source: &str,
        token: &str,
        actor: &str,
        now: Timestamp,
    ) -> Result<YieldRecord> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let total_collected = self
            .pool
            .total_collected
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let pending = self
            .pool
            .pending_distribution
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let source_total = match self.sources.iter().find(|s| s.name == source) {
            Some(entry) => entry.amount.checked_add(amount).ok_or(LedgerError::Overflow)?,
            None => amount,
        };

        let record = YieldRecord {
            amount,
            timestamp: now,
            source: source.to_string(),
            token: token.to_string(),
        };

        self.pool.total_collected = total_collected;
        self.pool.pending_distribution = pending;
        match self.sources.iter_mut().find(|s| s.name == source) {
            Some(entry) => entry.amount = source_total,
            None => self.sources.push(YieldSource {
                name: source.to_string(),
                amount: source_total,
            }),
        }
        self.recent_yields.push_front(record.clone());
        if self.recent_yields.len() > RECENT_WINDOW {
            self.recent_yields.pop_back();
        }

        self.audit.append(
            now,
            actor,
            AuditAction::YieldRecorded,
            format!("Amount: {amount} Source: {source}"),
        );
        tracing::info!(amount, source, token, "yield recorded");

        Ok(record)
    }

    /// Distribute yield from the pool.
    ///
    /// With the override inactive, each active collaborator with a positive
    /// weight receives its floored proportional share and the remainder goes
    /// to the sovereign beneficiary. With the override active, the entire
    /// amount is credited to the override beneficiary as a single line item.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if `amount` is zero
    /// - [`LedgerError::InsufficientPending`] if `amount` exceeds the pool
    /// - [`LedgerError::OverCommitted`] if active weights commit more than `amount`
    /// - [`LedgerError::Overflow`] if an earned accumulator would overflow
    pub fn distribute_yield(
        &mut self,
        amount: Amount,
        actor: &str,
        now: Timestamp,
    ) -> Result<DistributionReport> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if amount > self.pool.pending_distribution {
            return Err(LedgerError::InsufficientPending {
                requested: amount,
                pending: self.pool.pending_distribution,
            });
        }

        // Plan fully before applying so a rejection leaves no partial state.
        let lines = match self.override_state.beneficiary.as_ref() {
            Some(beneficiary) if self.override_state.is_active => vec![DistributionLine {
                collaborator: beneficiary.clone(),
                wallet: beneficiary.clone(),
                amount,
                weight: None,
            }],
            _ => split::plan(
                amount,
                &self.collaborators,
                &self.sovereign_name,
                &self.sovereign_wallet,
            )?,
        };

        // Still planning: every earned accumulator must fit before any is
        // credited.
        for line in &lines {
            if line.weight.is_none() {
                continue;
            }
            if let Some(collab) = self.collaborators.iter().find(|c| c.wallet == line.wallet) {
                collab
                    .total_earned
                    .checked_add(line.amount)
                    .ok_or(LedgerError::Overflow)?;
            }
        }
        let total_distributed = self
            .pool
            .total_distributed
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        for line in &lines {
            if line.weight.is_some() {
                if let Some(collab) = self.collaborators.iter_mut().find(|c| c.wallet == line.wallet)
                {
                    collab.total_earned += line.amount;
                    collab.last_distribution = now;
                }
            }
        }
        self.pool.total_distributed = total_distributed;
        self.pool.pending_distribution -= amount;

        self.audit.append(
            now,
            actor,
            AuditAction::RevenueDistributed,
            format!("Total: {amount} distributed"),
        );
        tracing::info!(
            amount,
            recipients = lines.len(),
            override_active = self.override_state.is_active,
            "revenue distributed"
        );

        Ok(DistributionReport {
            distributions: lines,
            total_distributed: amount,
            remaining: self.pool.pending_distribution,
            timestamp: now,
        })
    }

    /// Current yield pool aggregates.
    pub fn yield_pool(&self) -> &YieldPool {
        &self.pool
    }

    /// Per-source yield breakdown.
    pub fn yield_sources(&self) -> &[YieldSource] {
        &self.sources
    }

    /// Most recent yields, newest first.
    pub fn recent_yields(&self, limit: usize) -> Vec<YieldRecord> {
        self.recent_yields.iter().take(limit).cloned().collect()
    }

    // ---- Permissions ----

    /// Grant a role to an address. Idempotent; creates the permission record
    /// on first grant.
    pub fn grant_permission(
        &mut self,
        address: &str,
        role: Role,
        actor: &str,
        now: Timestamp,
    ) -> Permission {
        let permission = match self.permissions.iter_mut().find(|p| p.address == address) {
            Some(existing) => {
                if !existing.roles.contains(&role) {
                    existing.roles.push(role);
                }
                existing.clone()
            }
            None => {
                let created = Permission {
                    address: address.to_string(),
                    roles: vec![role],
                    is_active: true,
                };
                self.permissions.push(created.clone());
                created
            }
        };

        self.audit.append(
            now,
            actor,
            AuditAction::PermissionGranted,
            format!("{role} granted to {address}"),
        );
        tracing::info!(address, %role, "permission granted");

        permission
    }

    /// Revoke a role from an address. Idempotent on the role; the record
    /// itself is retained even when emptied.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::PermissionNotFound`] if the address has no record
    pub fn revoke_permission(
        &mut self,
        address: &str,
        role: Role,
        actor: &str,
        now: Timestamp,
    ) -> Result<Permission> {
        let permission = self
            .permissions
            .iter_mut()
            .find(|p| p.address == address)
            .ok_or_else(|| LedgerError::PermissionNotFound {
                address: address.to_string(),
            })?;

        permission.roles.retain(|r| *r != role);
        let updated = permission.clone();

        self.audit.append(
            now,
            actor,
            AuditAction::PermissionRevoked,
            format!("{role} revoked from {address}"),
        );
        tracing::info!(address, %role, "permission revoked");

        Ok(updated)
    }

    /// All permission records.
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    // ---- Override ----

    /// Activate the full-override redirect. Overwrites any prior override.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidBeneficiary`] if `beneficiary` is empty
    pub fn activate_override(
        &mut self,
        beneficiary: &str,
        actor: &str,
        now: Timestamp,
    ) -> Result<OverrideState> {
        if beneficiary.is_empty() {
            return Err(LedgerError::InvalidBeneficiary);
        }

        self.override_state =
            OverrideState::active(beneficiary.to_string(), actor.to_string(), now);

        self.audit.append(
            now,
            actor,
            AuditAction::OverrideActivated,
            format!("Beneficiary: {beneficiary}"),
        );
        tracing::warn!(beneficiary, "revenue override activated");

        Ok(self.override_state.clone())
    }

    /// Deactivate the override. Always succeeds.
    ///
    /// Returns the new (inactive) state and the previous state.
    pub fn deactivate_override(&mut self, actor: &str, now: Timestamp) -> (OverrideState, OverrideState) {
        let previous = std::mem::take(&mut self.override_state);

        self.audit.append(
            now,
            actor,
            AuditAction::OverrideDeactivated,
            "Revenue distribution restored to normal".to_string(),
        );
        tracing::info!("revenue override deactivated");

        (self.override_state.clone(), previous)
    }

    /// Current override state.
    pub fn override_state(&self) -> &OverrideState {
        &self.override_state
    }

    // ---- Reports ----

    fn yield_summary(&self) -> YieldSummary {
        let efficiency = if self.pool.total_collected == 0 {
            0.0
        } else {
            self.pool.total_distributed as f64 / self.pool.total_collected as f64 * 100.0
        };
        YieldSummary {
            total_collected: self.pool.total_collected,
            total_distributed: self.pool.total_distributed,
            pending_distribution: self.pool.pending_distribution,
            distribution_efficiency: efficiency,
        }
    }

    /// Dashboard overview snapshot.
    pub fn overview(&self, now: Timestamp) -> Overview {
        Overview {
            timestamp: now,
            zakat_treasury: self.treasury.clone(),
            collaborators: self.collaborator_summary(),
            yields: self.yield_summary(),
            override_status: self.override_state.is_active,
            recent_activity: self.audit.recent(OVERVIEW_ACTIVITY_WINDOW, None),
        }
    }

    /// Comprehensive analytics report.
    pub fn analytics(&self, now: Timestamp) -> Analytics {
        let average_contribution = if self.treasury.contribution_count == 0 {
            0.0
        } else {
            self.treasury.total_contributions as f64 / self.treasury.contribution_count as f64
        };

        let mut performers: Vec<&Collaborator> =
            self.collaborators.iter().filter(|c| c.is_active).collect();
        performers.sort_by(|a, b| b.total_earned.cmp(&a.total_earned));

        Analytics {
            timestamp: now,
            treasury: TreasuryAnalytics {
                zakat_balance: self.treasury.balance,
                total_contributions: self.treasury.total_contributions,
                average_contribution,
            },
            revenue: self.yield_summary(),
            collaborators: self.collaborator_summary(),
            top_performers: performers
                .into_iter()
                .take(TOP_PERFORMER_COUNT)
                .map(|c| TopPerformer {
                    name: c.name.clone(),
                    role: c.role.clone(),
                    total_earned: c.total_earned,
                    revenue_weight: c.revenue_weight,
                })
                .collect(),
        }
    }

    /// Audit trail query, newest first.
    pub fn audit_trail(&self, limit: usize, action: Option<AuditAction>) -> AuditTrailView {
        AuditTrailView {
            logs: self.audit.recent(limit, action),
            total: self.audit.len(),
            actions: self.audit.actions(),
        }
    }

    /// Full retained audit log, oldest first.
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.all()
    }

    /// Full retained audit log as CSV.
    pub fn audit_csv(&self) -> String {
        self.audit.to_csv()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_SOVEREIGN_NAME, DEFAULT_SOVEREIGN_WALLET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: Timestamp = 1_700_000_000;

    fn ledger() -> Ledger {
        Ledger::default()
    }

    #[test]
    fn test_contribute_updates_treasury() {
        let mut l = ledger();
        let record = l
            .contribute(50_000, "NFT Sales", "0x1234", "admin", NOW)
            .expect("contribute");
        assert_eq!(record.amount, 50_000);
        assert_eq!(l.treasury().balance, 50_000);
        assert_eq!(l.treasury().total_contributions, 50_000);
        assert_eq!(l.treasury().contribution_count, 1);
        assert_eq!(l.recent_contributions(10).len(), 1);
    }

    #[test]
    fn test_contribute_zero_rejected_without_mutation() {
        let mut l = ledger();
        assert!(matches!(
            l.contribute(0, "x", "0x1", "admin", NOW),
            Err(LedgerError::InvalidAmount)
        ));
        assert_eq!(l.treasury().contribution_count, 0);
        assert!(l.audit_entries().is_empty());
    }

    #[test]
    fn test_contribute_overflow_rejected_without_mutation() {
        let mut l = ledger();
        l.contribute(u64::MAX, "src", "0x1", "admin", NOW).expect("contribute");
        assert!(matches!(
            l.contribute(1, "src", "0x1", "admin", NOW + 1),
            Err(LedgerError::Overflow)
        ));
        assert_eq!(l.treasury().balance, u64::MAX);
        assert_eq!(l.treasury().total_contributions, u64::MAX);
        assert_eq!(l.treasury().contribution_count, 1);
        assert_eq!(l.audit_entries().len(), 1);
    }

    #[test]
    fn test_record_yield_overflow_rejected_without_mutation() {
        let mut l = ledger();
        l.record_yield(u64::MAX, "Fees", "ETH", "admin", NOW).expect("record");
        assert!(matches!(
            l.record_yield(1, "Fees", "ETH", "admin", NOW + 1),
            Err(LedgerError::Overflow)
        ));
        assert_eq!(l.yield_pool().total_collected, u64::MAX);
        assert_eq!(l.yield_pool().pending_distribution, u64::MAX);
        assert_eq!(l.yield_sources().len(), 1);
        assert_eq!(l.yield_sources()[0].amount, u64::MAX);
        assert_eq!(l.recent_yields(10).len(), 1);
    }

    #[test]
    fn test_recent_contributions_bounded() {
        let mut l = ledger();
        for i in 1..=(RECENT_WINDOW as u64 + 10) {
            l.contribute(i, "src", "0x1", "admin", NOW + i).expect("contribute");
        }
        let recent = l.recent_contributions(RECENT_WINDOW + 10);
        assert_eq!(recent.len(), RECENT_WINDOW);
        // Newest first; the oldest 10 were evicted.
        assert_eq!(recent[0].amount, RECENT_WINDOW as u64 + 10);
        assert_eq!(recent[RECENT_WINDOW - 1].amount, 11);
        assert_eq!(l.treasury().contribution_count, RECENT_WINDOW as u64 + 10);
    }

    #[test]
    fn test_add_collaborator_rejects_duplicates_and_bad_weight() {
        let mut l = ledger();
        l.add_collaborator("Dev", "0xA", 1000, "Technical Lead", "admin", NOW)
            .expect("add");
        assert!(matches!(
            l.add_collaborator("Dev Again", "0xA", 500, "Lead", "admin", NOW),
            Err(LedgerError::DuplicateWallet { .. })
        ));
        assert!(matches!(
            l.add_collaborator("Greedy", "0xB", 10_001, "Lead", "admin", NOW),
            Err(LedgerError::InvalidWeight { .. })
        ));
        assert_eq!(l.collaborators(false).len(), 1);
    }

    #[test]
    fn test_set_weight_reports_old_and_new() {
        let mut l = ledger();
        l.add_collaborator("Dev", "0xA", 1000, "Lead", "admin", NOW)
            .expect("add");
        let (collab, old, new) = l.set_weight("0xA", 1200, "admin", NOW).expect("set weight");
        assert_eq!((old, new), (1000, 1200));
        assert_eq!(collab.revenue_weight, 1200);
        assert!(matches!(
            l.set_weight("0xZ", 100, "admin", NOW),
            Err(LedgerError::CollaboratorNotFound { .. })
        ));
    }

    #[test]
    fn test_distribution_scenario() {
        // Add one collaborator at 10%, record 10000 yield, distribute all.
        let mut l = ledger();
        l.add_collaborator("Dev", "0xA", 1000, "Lead", "admin", NOW)
            .expect("add");
        l.record_yield(10_000, "NFT Marketplace", "ETH", "admin", NOW)
            .expect("record");

        let report = l.distribute_yield(10_000, "admin", NOW + 1).expect("distribute");
        assert_eq!(report.total_distributed, 10_000);
        assert_eq!(report.remaining, 0);
        assert_eq!(report.distributions.len(), 2);
        assert_eq!(report.distributions[0].amount, 1000);
        assert_eq!(report.distributions[1].amount, 9000);
        assert_eq!(report.distributions[1].wallet, DEFAULT_SOVEREIGN_WALLET);

        let collab = l.collaborator("0xA").expect("lookup");
        assert_eq!(collab.total_earned, 1000);
        assert_eq!(collab.last_distribution, NOW + 1);
        assert_eq!(l.yield_pool().pending_distribution, 0);
        assert_eq!(l.yield_pool().total_distributed, 10_000);
    }

    #[test]
    fn test_deactivated_collaborator_receives_nothing() {
        let mut l = ledger();
        l.add_collaborator("Dev", "0xA", 5000, "Lead", "admin", NOW)
            .expect("add");
        l.set_active_status("0xA", false, "admin", NOW).expect("deactivate");
        l.record_yield(10_000, "Fees", "ETH", "admin", NOW).expect("record");

        let report = l.distribute_yield(10_000, "admin", NOW).expect("distribute");
        assert_eq!(report.distributions.len(), 1);
        assert_eq!(report.distributions[0].amount, 10_000);
        assert_eq!(l.collaborator("0xA").expect("lookup").total_earned, 0);
    }

    #[test]
    fn test_distribute_insufficient_pending_is_atomic() {
        let mut l = ledger();
        l.add_collaborator("Dev", "0xA", 1000, "Lead", "admin", NOW)
            .expect("add");
        l.record_yield(5_000, "Fees", "ETH", "admin", NOW).expect("record");
        let audit_len = l.audit_entries().len();

        assert!(matches!(
            l.distribute_yield(6_000, "admin", NOW),
            Err(LedgerError::InsufficientPending { .. })
        ));
        assert_eq!(l.yield_pool().pending_distribution, 5_000);
        assert_eq!(l.collaborator("0xA").expect("lookup").total_earned, 0);
        assert_eq!(l.audit_entries().len(), audit_len);
    }

    #[test]
    fn test_distribute_over_committed_is_atomic() {
        let mut l = ledger();
        l.add_collaborator("A", "0xA", 7500, "Lead", "admin", NOW).expect("add");
        l.add_collaborator("B", "0xB", 7500, "Lead", "admin", NOW).expect("add");
        l.record_yield(100, "Fees", "ETH", "admin", NOW).expect("record");

        assert!(matches!(
            l.distribute_yield(100, "admin", NOW),
            Err(LedgerError::OverCommitted { .. })
        ));
        assert_eq!(l.yield_pool().pending_distribution, 100);
        assert_eq!(l.yield_pool().total_distributed, 0);
        assert_eq!(l.collaborator("0xA").expect("lookup").total_earned, 0);
    }

    #[test]
    fn test_pending_invariant_across_operations() {
        let mut l = ledger();
        l.add_collaborator("Dev", "0xA", 2500, "Lead", "admin", NOW).expect("add");
        l.record_yield(10_000, "Fees", "ETH", "admin", NOW).expect("record");
        l.record_yield(2_500, "Staking", "MIRROR", "admin", NOW).expect("record");
        l.distribute_yield(4_000, "admin", NOW).expect("distribute");
        l.distribute_yield(1_000, "admin", NOW).expect("distribute");

        let pool = l.yield_pool();
        assert_eq!(
            pool.pending_distribution,
            pool.total_collected - pool.total_distributed
        );
        assert_eq!(pool.total_collected, 12_500);
        assert_eq!(pool.total_distributed, 5_000);
    }

    #[test]
    fn test_override_takes_precedence() {
        let mut l = ledger();
        l.add_collaborator("Dev", "0xA", 9000, "Lead", "admin", NOW).expect("add");
        l.record_yield(10_000, "Fees", "ETH", "admin", NOW).expect("record");
        l.activate_override("0xBeneficiary", "admin", NOW).expect("activate");

        let report = l.distribute_yield(10_000, "admin", NOW).expect("distribute");
        assert_eq!(report.distributions.len(), 1);
        assert_eq!(report.distributions[0].wallet, "0xBeneficiary");
        assert_eq!(report.distributions[0].amount, 10_000);
        assert_eq!(l.collaborator("0xA").expect("lookup").total_earned, 0);

        let (current, previous) = l.deactivate_override("admin", NOW);
        assert!(!current.is_active);
        assert_eq!(previous.beneficiary.as_deref(), Some("0xBeneficiary"));
    }

    #[test]
    fn test_activate_override_rejects_empty_beneficiary() {
        let mut l = ledger();
        assert!(matches!(
            l.activate_override("", "admin", NOW),
            Err(LedgerError::InvalidBeneficiary)
        ));
        assert!(!l.override_state().is_active);
    }

    #[test]
    fn test_override_overwrites_prior() {
        let mut l = ledger();
        l.activate_override("0xFirst", "admin", NOW).expect("activate");
        let state = l.activate_override("0xSecond", "admin", NOW + 5).expect("activate");
        assert_eq!(state.beneficiary.as_deref(), Some("0xSecond"));
        assert_eq!(state.activated_at, Some(NOW + 5));
    }

    #[test]
    fn test_permission_grant_idempotent_and_revoke() {
        let mut l = ledger();
        let p = l.grant_permission("0xOps", Role::Auditor, "admin", NOW);
        assert_eq!(p.roles, vec![Role::Auditor]);
        let p = l.grant_permission("0xOps", Role::Auditor, "admin", NOW);
        assert_eq!(p.roles, vec![Role::Auditor]);
        let p = l.grant_permission("0xOps", Role::RevenueManager, "admin", NOW);
        assert_eq!(p.roles.len(), 2);

        let p = l
            .revoke_permission("0xOps", Role::Auditor, "admin", NOW)
            .expect("revoke");
        assert_eq!(p.roles, vec![Role::RevenueManager]);
        // Record survives even when emptied.
        l.revoke_permission("0xOps", Role::RevenueManager, "admin", NOW)
            .expect("revoke");
        assert_eq!(l.permissions().len(), 1);

        assert!(matches!(
            l.revoke_permission("0xNobody", Role::Admin, "admin", NOW),
            Err(LedgerError::PermissionNotFound { .. })
        ));
    }

    #[test]
    fn test_every_mutation_appends_one_audit_entry() {
        let mut l = ledger();
        let expectations: [(_, AuditAction); 9] = [
            (
                l.contribute(100, "s", "0x1", "admin", NOW).map(|_| ()),
                AuditAction::ZakatContributed,
            ),
            (
                l.add_collaborator("Dev", "0xA", 100, "Lead", "admin", NOW).map(|_| ()),
                AuditAction::CollaboratorAdded,
            ),
            (
                l.set_weight("0xA", 200, "admin", NOW).map(|_| ()),
                AuditAction::WeightAdjusted,
            ),
            (
                l.set_active_status("0xA", false, "admin", NOW).map(|_| ()),
                AuditAction::CollaboratorStatusChanged,
            ),
            (
                l.record_yield(1_000, "s", "ETH", "admin", NOW).map(|_| ()),
                AuditAction::YieldRecorded,
            ),
            (
                l.distribute_yield(1_000, "admin", NOW).map(|_| ()),
                AuditAction::RevenueDistributed,
            ),
            (
                {
                    l.grant_permission("0xOps", Role::Admin, "admin", NOW);
                    Ok(())
                },
                AuditAction::PermissionGranted,
            ),
            (
                l.activate_override("0xB", "admin", NOW).map(|_| ()),
                AuditAction::OverrideActivated,
            ),
            (
                {
                    l.deactivate_override("admin", NOW);
                    Ok(())
                },
                AuditAction::OverrideDeactivated,
            ),
        ];

        for (result, _) in &expectations {
            assert!(result.is_ok());
        }
        let entries = l.audit_entries();
        assert_eq!(entries.len(), expectations.len());
        for (entry, (_, action)) in entries.iter().zip(expectations.iter()) {
            assert_eq!(entry.action, *action);
        }
    }

    #[test]
    fn test_overview_snapshot() {
        let mut l = ledger();
        l.contribute(50_000, "NFT Sales", "0x1", "admin", NOW).expect("contribute");
        l.add_collaborator("Dev", "0xA", 1000, "Lead", "admin", NOW).expect("add");
        l.add_collaborator("Mkt", "0xB", 800, "Marketing", "admin", NOW).expect("add");
        l.set_active_status("0xB", false, "admin", NOW).expect("status");
        l.record_yield(10_000, "Fees", "ETH", "admin", NOW).expect("record");
        l.distribute_yield(5_000, "admin", NOW).expect("distribute");

        let overview = l.overview(NOW + 100);
        assert_eq!(overview.zakat_treasury.balance, 50_000);
        assert_eq!(overview.collaborators.total, 2);
        assert_eq!(overview.collaborators.active, 1);
        assert_eq!(overview.collaborators.total_weight_allocated, 1000);
        assert!((overview.yields.distribution_efficiency - 50.0).abs() < f64::EPSILON);
        assert!(!overview.override_status);
        assert_eq!(overview.recent_activity.len(), OVERVIEW_ACTIVITY_WINDOW);
        // Newest first.
        assert_eq!(
            overview.recent_activity[0].action,
            AuditAction::RevenueDistributed
        );
    }

    #[test]
    fn test_analytics_top_performers() {
        let mut l = ledger();
        l.add_collaborator("A", "0xA", 3000, "Lead", "admin", NOW).expect("add");
        l.add_collaborator("B", "0xB", 1000, "Marketing", "admin", NOW).expect("add");
        l.record_yield(100_000, "Fees", "ETH", "admin", NOW).expect("record");
        l.distribute_yield(100_000, "admin", NOW).expect("distribute");

        let analytics = l.analytics(NOW);
        assert_eq!(analytics.top_performers.len(), 2);
        assert_eq!(analytics.top_performers[0].name, "A");
        assert_eq!(analytics.top_performers[0].total_earned, 30_000);
        assert_eq!(analytics.collaborators.total_earned_all_time, 40_000);
    }

    #[test]
    fn test_audit_trail_filter_and_totals() {
        let mut l = ledger();
        l.contribute(100, "s", "0x1", "admin", NOW).expect("contribute");
        l.record_yield(100, "s", "ETH", "admin", NOW).expect("record");
        l.record_yield(200, "s", "ETH", "admin", NOW).expect("record");

        let view = l.audit_trail(50, Some(AuditAction::YieldRecorded));
        assert_eq!(view.logs.len(), 2);
        assert_eq!(view.total, 3);
        assert_eq!(
            view.actions,
            vec![AuditAction::ZakatContributed, AuditAction::YieldRecorded]
        );
    }

    #[test]
    fn test_yield_sources_accumulate() {
        let mut l = ledger();
        l.record_yield(100, "NFT Sales", "ETH", "admin", NOW).expect("record");
        l.record_yield(50, "NFT Sales", "ETH", "admin", NOW).expect("record");
        l.record_yield(25, "Staking", "MIRROR", "admin", NOW).expect("record");

        let sources = l.yield_sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "NFT Sales");
        assert_eq!(sources[0].amount, 150);
        assert_eq!(sources[1].amount, 25);
    }
}
