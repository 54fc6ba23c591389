//! Engine Integration Tests
//!
//! Full forward-pass behavior: the nine assembled columns, per-wave resets,
//! and the cross-wave psychological-cost accumulation.

use arrears_shares_core_rs::{compute_shares, Month, Panel, PanelRow, ShareColumns};

const EPS: f64 = 1e-12;

// ============================================================================
// Test Helpers
// ============================================================================

fn panel(rows: Vec<PanelRow>) -> Panel {
    Panel::from_rows(rows).expect("test panel must validate")
}

fn columns_of(rows: Vec<PanelRow>) -> Vec<ShareColumns> {
    compute_shares(&panel(rows))
        .rows()
        .iter()
        .map(|r| r.columns.clone())
        .collect()
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value must be present");
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Worked Scenario: Overshooting Repayment
// ============================================================================

/// Accruals of 100 and 50 at a flat supposed wage of 200; one repayment of
/// 130 in the second month.
fn overshoot_wave() -> Vec<PanelRow> {
    vec![
        PanelRow::new("W01", 1, Month::new(660), 100.0).with_owed(100.0),
        PanelRow::new("W01", 1, Month::new(661), 150.0)
            .with_owed(50.0)
            .with_repaid(130.0),
    ]
}

#[test]
fn test_overshoot_scenario_allocated_ratio() {
    let columns = columns_of(overshoot_wave());

    // 100/200 from the first arrear month plus 30/200 from the second
    assert_close(columns[1].allocated_ratio, 0.65);
}

#[test]
fn test_overshoot_scenario_all_columns() {
    let columns = columns_of(overshoot_wave());

    // First month: accrual only
    assert_close(columns[0].accrual_ratio, 0.5);
    assert_eq!(columns[0].allocated_ratio, None);
    assert_eq!(columns[0].raw_repaid_ratio, None);
    assert_close(columns[0].cumulative_accrual_ratio, 0.5);
    assert_eq!(columns[0].cumulative_allocated_ratio, None);
    assert_close(columns[0].net_share, 0.5);
    assert_close(columns[0].cumulative_net_share, 0.5);
    assert_close(columns[0].psych_cost_increment, 0.0);
    assert_close(columns[0].psychological_cost, 0.0);

    // Second month: accrual plus the overshooting repayment
    assert_close(columns[1].accrual_ratio, 0.25);
    assert_close(columns[1].raw_repaid_ratio, 0.65);
    assert_close(columns[1].cumulative_accrual_ratio, 0.75);
    assert_close(columns[1].cumulative_allocated_ratio, 0.65);
    assert_close(columns[1].net_share, 0.25 - 0.65);
    assert_close(columns[1].cumulative_net_share, 0.5 + 0.25 - 0.65);
    // Allocated and raw ratios coincide here, so no psychological cost
    assert_close(columns[1].psych_cost_increment, 0.0);
    assert_close(columns[1].psychological_cost, 0.0);
}

// ============================================================================
// Worked Scenario: Two Partial Repayments
// ============================================================================

#[test]
fn test_partial_repayments_scenario() {
    // One arrear of 50 at supposed wage 100, repaid 20 then 30
    let columns = columns_of(vec![
        PanelRow::new("W01", 1, Month::new(1), 50.0).with_owed(50.0),
        PanelRow::new("W01", 1, Month::new(2), 100.0).with_repaid(20.0),
        PanelRow::new("W01", 1, Month::new(3), 100.0).with_repaid(30.0),
    ]);

    assert_close(columns[1].allocated_ratio, 0.20);
    assert_close(columns[2].allocated_ratio, 0.30);
    assert_close(columns[2].cumulative_allocated_ratio, 0.50);
}

// ============================================================================
// Absence Propagation
// ============================================================================

#[test]
fn test_cumulative_sums_skip_absent_rows_without_resetting() {
    let columns = columns_of(vec![
        PanelRow::new("W01", 1, Month::new(1), 100.0).with_owed(100.0),
        PanelRow::new("W01", 1, Month::new(2), 100.0),
        PanelRow::new("W01", 1, Month::new(3), 100.0).with_owed(100.0),
    ]);

    assert_close(columns[0].cumulative_accrual_ratio, 0.5);
    // The quiet month reports no cumulative value of its own...
    assert_eq!(columns[1].cumulative_accrual_ratio, None);
    // ...but the sum continues past it
    assert_close(columns[2].cumulative_accrual_ratio, 1.0);
}

#[test]
fn test_zero_supposed_wage_propagates_absent_not_nan() {
    // Wage 0, no accrual: the repayment ratio is undefined
    let columns = columns_of(vec![
        PanelRow::new("W01", 1, Month::new(1), 0.0).with_repaid(30.0)
    ]);

    assert_eq!(columns[0].raw_repaid_ratio, None);
    assert_eq!(columns[0].allocated_ratio, None);
    // Absent operands count as zero in the always-defined sums
    assert_close(columns[0].net_share, 0.0);
    assert_close(columns[0].psychological_cost, 0.0);
}

#[test]
fn test_repayments_without_any_accrual_rows_stay_absent() {
    let columns = columns_of(vec![
        PanelRow::new("W01", 1, Month::new(1), 100.0).with_repaid(40.0),
        PanelRow::new("W01", 1, Month::new(2), 100.0).with_repaid(10.0),
    ]);

    for column in &columns {
        assert_eq!(column.allocated_ratio, None);
        assert_eq!(column.cumulative_allocated_ratio, None);
    }
    // The raw repaid ratio is still defined; it feeds the psych cost
    assert_close(columns[0].raw_repaid_ratio, 0.4);
    assert_close(columns[0].psych_cost_increment, -0.4);
}

// ============================================================================
// Wave and Individual Scoping
// ============================================================================

#[test]
fn test_ledger_resets_at_wave_boundary() {
    // Wave 1 leaves unpaid arrears; wave 2's repayment cannot touch them
    let columns = columns_of(vec![
        PanelRow::new("W01", 1, Month::new(1), 0.0).with_owed(100.0),
        PanelRow::new("W01", 2, Month::new(10), 100.0).with_repaid(50.0),
    ]);

    assert_eq!(columns[1].allocated_ratio, None);
}

#[test]
fn test_psych_cost_continues_across_wave_boundary() {
    // Wave 1: arrear at supposed wage 100, repaid 30 in a month whose own
    // supposed wage is 50 -> r2w 0.3, r2cw 0.6, increment -0.3
    // Wave 2: arrear at supposed wage 100, repaid 50 in a month whose own
    // supposed wage is 25 -> r2w 0.5, r2cw 2.0, increment -1.5
    let columns = columns_of(vec![
        PanelRow::new("W01", 1, Month::new(1), 50.0).with_owed(50.0),
        PanelRow::new("W01", 1, Month::new(2), 50.0).with_repaid(30.0),
        PanelRow::new("W01", 2, Month::new(10), 0.0).with_owed(100.0),
        PanelRow::new("W01", 2, Month::new(11), 25.0).with_repaid(50.0),
    ]);

    assert_close(columns[1].psych_cost_increment, -0.3);
    assert_close(columns[1].psychological_cost, -0.3);
    // First row of wave 2 carries the total forward unchanged
    assert_close(columns[2].psych_cost_increment, 0.0);
    assert_close(columns[2].psychological_cost, -0.3);
    assert_close(columns[3].psych_cost_increment, -1.5);
    assert_close(columns[3].psychological_cost, -1.8);
}

#[test]
fn test_per_wave_sums_reset_at_wave_boundary() {
    let columns = columns_of(vec![
        PanelRow::new("W01", 1, Month::new(1), 100.0).with_owed(100.0),
        PanelRow::new("W01", 2, Month::new(10), 100.0).with_owed(300.0),
    ]);

    assert_close(columns[0].cumulative_accrual_ratio, 0.5);
    // Wave 2 starts its own sum: 300/400, not 0.5 + 0.75
    assert_close(columns[1].cumulative_accrual_ratio, 0.75);
    assert_close(columns[1].cumulative_net_share, 0.75);
}

#[test]
fn test_individuals_are_fully_independent() {
    let rows = |id: &str| {
        vec![
            PanelRow::new(id, 1, Month::new(1), 50.0).with_owed(50.0),
            PanelRow::new(id, 1, Month::new(2), 50.0).with_repaid(30.0),
        ]
    };

    let mut combined = rows("A");
    combined.extend(rows("B"));
    let columns = columns_of(combined);

    // B's psych cost starts from zero, identical to A's
    assert_close(columns[1].psychological_cost, -0.3);
    assert_close(columns[3].psychological_cost, -0.3);
}
