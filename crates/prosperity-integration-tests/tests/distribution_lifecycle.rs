//! Integration test: Economic correctness of the distribution lifecycle.
//!
//! Exercises the complete governance flow:
//! 1. Record treasury contributions and verify treasury state
//! 2. Register collaborators with distinct weights
//! 3. Record yields from multiple sources
//! 4. Distribute yield and verify proportional shares plus the sovereign
//!    remainder
//! 5. Verify balance conservation across distributions
//! 6. Verify the pending-distribution invariant after every step
//! 7. Verify monotonic counters never decrease
//!
//! This test uses prosperity-ledger and prosperity-types without any I/O.

use prosperity_ledger::{Ledger, LedgerError};
use prosperity_types::yields::DistributionReport;

/// Base timestamp for test scenarios.
const BASE_TIME: u64 = 1_700_000_000;

fn assert_conserved(report: &DistributionReport, amount: u64) {
    let total: u64 = report.distributions.iter().map(|l| l.amount).sum();
    assert_eq!(total, amount, "line items must sum to the amount exactly");
}

#[test]
fn full_lifecycle_contribute_earn_distribute() {
    let mut ledger = Ledger::new("Sovereign (Chais)", "0xSovereign...Chais");

    // =========================================================
    // Treasury: contribute 50000 from NFT sales
    // =========================================================
    ledger
        .contribute(50_000, "NFT Sales", "0x1234...5678", "admin", BASE_TIME)
        .expect("contribution should succeed");
    assert_eq!(ledger.treasury().balance, 50_000);
    assert_eq!(ledger.treasury().contribution_count, 1);

    // =========================================================
    // Collaborators: 10%, 8%, and 5%, plus an inactive one at 7%
    // =========================================================
    ledger
        .add_collaborator("Lead Developer", "0x1111", 1000, "Technical Lead", "admin", BASE_TIME)
        .expect("add lead developer");
    ledger
        .add_collaborator("Marketing Director", "0x2222", 800, "Marketing & Growth", "admin", BASE_TIME)
        .expect("add marketing director");
    ledger
        .add_collaborator("Community Manager", "0x3333", 500, "Community Engagement", "admin", BASE_TIME)
        .expect("add community manager");
    ledger
        .add_collaborator("Content Creator", "0x4444", 700, "Content Production", "admin", BASE_TIME)
        .expect("add content creator");
    ledger
        .set_active_status("0x4444", false, "admin", BASE_TIME)
        .expect("deactivate content creator");

    let summary = ledger.collaborator_summary();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.active, 3);
    assert_eq!(summary.total_weight_allocated, 2300);

    // =========================================================
    // Yields: two sources
    // =========================================================
    ledger
        .record_yield(150_000, "NFT Marketplace", "ETH", "admin", BASE_TIME + 100)
        .expect("record marketplace yield");
    ledger
        .record_yield(50_000, "Staking Pool", "MIRROR", "admin", BASE_TIME + 200)
        .expect("record staking yield");
    assert_eq!(ledger.yield_pool().pending_distribution, 200_000);

    // =========================================================
    // Distribute 100000: 10% + 8% + 5% to actives, 77% to sovereign
    // =========================================================
    let report = ledger
        .distribute_yield(100_000, "admin", BASE_TIME + 300)
        .expect("distribution should succeed");
    assert_conserved(&report, 100_000);
    assert_eq!(report.distributions.len(), 4);
    assert_eq!(report.distributions[0].amount, 10_000);
    assert_eq!(report.distributions[1].amount, 8_000);
    assert_eq!(report.distributions[2].amount, 5_000);
    assert_eq!(report.distributions[3].amount, 77_000);
    assert_eq!(report.distributions[3].wallet, "0xSovereign...Chais");
    assert_eq!(report.remaining, 100_000);

    // The deactivated collaborator earned nothing.
    assert_eq!(ledger.collaborator("0x4444").expect("lookup").total_earned, 0);
    assert_eq!(ledger.collaborator("0x1111").expect("lookup").total_earned, 10_000);

    // =========================================================
    // Pending invariant and monotonicity across a second round
    // =========================================================
    let collected_before = ledger.yield_pool().total_collected;
    let distributed_before = ledger.yield_pool().total_distributed;
    let earned_before = ledger.collaborator("0x2222").expect("lookup").total_earned;

    let report = ledger
        .distribute_yield(100_000, "admin", BASE_TIME + 400)
        .expect("second distribution");
    assert_conserved(&report, 100_000);

    let pool = ledger.yield_pool();
    assert_eq!(pool.pending_distribution, pool.total_collected - pool.total_distributed);
    assert_eq!(pool.pending_distribution, 0);
    assert!(pool.total_collected >= collected_before);
    assert!(pool.total_distributed > distributed_before);
    assert!(ledger.collaborator("0x2222").expect("lookup").total_earned > earned_before);

    // Nothing left to distribute.
    assert!(matches!(
        ledger.distribute_yield(1, "admin", BASE_TIME + 500),
        Err(LedgerError::InsufficientPending { .. })
    ));
}

#[test]
fn rounding_remainder_sweeps_to_sovereign() {
    let mut ledger = Ledger::default();
    ledger
        .add_collaborator("A", "0xA", 3333, "Lead", "admin", BASE_TIME)
        .expect("add A");
    ledger
        .add_collaborator("B", "0xB", 3333, "Lead", "admin", BASE_TIME)
        .expect("add B");
    ledger
        .add_collaborator("C", "0xC", 3334, "Lead", "admin", BASE_TIME)
        .expect("add C");
    ledger
        .record_yield(100, "Fees", "ETH", "admin", BASE_TIME)
        .expect("record");

    let report = ledger
        .distribute_yield(100, "admin", BASE_TIME)
        .expect("distribute");
    assert_conserved(&report, 100);
    let amounts: Vec<u64> = report.distributions.iter().map(|l| l.amount).collect();
    assert_eq!(amounts, vec![33, 33, 34, 0]);
}

#[test]
fn dust_distribution_goes_entirely_to_sovereign() {
    let mut ledger = Ledger::default();
    ledger
        .add_collaborator("A", "0xA", 1, "Lead", "admin", BASE_TIME)
        .expect("add A");
    ledger
        .add_collaborator("B", "0xB", 1, "Lead", "admin", BASE_TIME)
        .expect("add B");
    ledger
        .record_yield(1, "Fees", "ETH", "admin", BASE_TIME)
        .expect("record");

    let report = ledger
        .distribute_yield(1, "admin", BASE_TIME)
        .expect("distribute");
    assert_conserved(&report, 1);
    assert_eq!(report.distributions.len(), 1);
    assert_eq!(report.distributions[0].amount, 1);
    assert_eq!(ledger.collaborator("0xA").expect("lookup").total_earned, 0);
}

#[test]
fn adversarial_weight_tables_never_break_conservation() {
    // Weight tables summing under, at, and just below the over-commit
    // boundary all conserve the distributed amount exactly.
    let tables: &[&[u32]] = &[
        &[1, 1, 1],
        &[2500, 2500, 2500, 2500],
        &[9999],
        &[10_000],
        &[3000, 3000, 3999],
        &[1, 9998],
    ];

    for (t, weights) in tables.iter().enumerate() {
        let mut ledger = Ledger::default();
        for (i, w) in weights.iter().enumerate() {
            ledger
                .add_collaborator(
                    &format!("C{i}"),
                    &format!("0x{t}-{i}"),
                    *w,
                    "Contributor",
                    "admin",
                    BASE_TIME,
                )
                .expect("add collaborator");
        }
        for amount in [1u64, 7, 100, 9_999, 1_000_000] {
            ledger
                .record_yield(amount, "Fees", "ETH", "admin", BASE_TIME)
                .expect("record");
            let report = ledger
                .distribute_yield(amount, "admin", BASE_TIME)
                .expect("distribute");
            assert_conserved(&report, amount);
        }
    }
}

#[test]
fn over_committed_weight_table_is_rejected_atomically() {
    let mut ledger = Ledger::default();
    // Active weights sum to 15000 basis points.
    ledger
        .add_collaborator("A", "0xA", 7500, "Lead", "admin", BASE_TIME)
        .expect("add A");
    ledger
        .add_collaborator("B", "0xB", 7500, "Lead", "admin", BASE_TIME)
        .expect("add B");
    ledger
        .record_yield(1_000, "Fees", "ETH", "admin", BASE_TIME)
        .expect("record");

    let audit_before = ledger.audit_entries().len();
    let err = ledger
        .distribute_yield(1_000, "admin", BASE_TIME)
        .expect_err("over-committed table must be rejected");
    assert!(matches!(err, LedgerError::OverCommitted { committed: 1_500, amount: 1_000 }));

    // No partial state: pool, earnings, and audit log are untouched.
    assert_eq!(ledger.yield_pool().pending_distribution, 1_000);
    assert_eq!(ledger.yield_pool().total_distributed, 0);
    assert_eq!(ledger.collaborator("0xA").expect("lookup").total_earned, 0);
    assert_eq!(ledger.audit_entries().len(), audit_before);

    // Deactivating one collaborator brings the table back under 100%.
    ledger
        .set_active_status("0xB", false, "admin", BASE_TIME)
        .expect("deactivate");
    let report = ledger
        .distribute_yield(1_000, "admin", BASE_TIME)
        .expect("distribution succeeds once under-committed");
    assert_conserved(&report, 1_000);
    assert_eq!(report.distributions[0].amount, 750);
}
