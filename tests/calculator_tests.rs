//! Estimator calculator tests

use pretty_assertions::assert_eq;
use unified_estimator::catalog::{default_resources, EstimationModule};
use unified_estimator::core::{
    compute_base_cost, compute_final_estimate, compute_resource_costs,
    compute_revised_data_point, compute_scaling_factor, compute_task_costs, estimate,
    resource_costs_or_zero, BASE_DATA_POINT,
};
use unified_estimator::{EstimatorError, Location, ResourceEntry, ResourceRow, TaskEntry};

fn rows(entries: Vec<ResourceEntry>) -> Vec<ResourceRow> {
    entries.into_iter().map(ResourceRow::from).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// REVISED DATA POINT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_revised_data_point_exact_product_when_all_positive() {
    let tasks = vec![
        TaskEntry::new("A", 2.0, 3.0),
        TaskEntry::new("B", 4.0, 0.5),
        TaskEntry::new("C", 7.0, 1.0),
    ];
    let expected = (2.0 * 3.0) * (4.0 * 0.5) * (7.0 * 1.0);
    assert_eq!(compute_revised_data_point(&tasks), expected);
}

#[test]
fn test_non_positive_costs_contribute_exactly_one() {
    let positive = vec![TaskEntry::new("A", 8.0, 2.5), TaskEntry::new("B", 3.0, 3.0)];
    let baseline = compute_revised_data_point(&positive);

    for bad in [
        TaskEntry::new("zero qty", 0.0, 5.0),
        TaskEntry::new("zero rate", 5.0, 0.0),
        TaskEntry::new("negative", -2.0, 4.0),
        TaskEntry::new("both negative", -2.0, -4.0),
    ] {
        let mut tasks = positive.clone();
        let contributes_one = bad.cost() <= 0.0;
        tasks.insert(1, bad);
        let revised = compute_revised_data_point(&tasks);
        if contributes_one {
            assert_eq!(revised, baseline);
        } else {
            // -2 × -4 is a positive cost and multiplies in normally
            assert_eq!(revised, baseline * 8.0);
        }
    }
}

#[test]
fn test_task_costs_keep_order_and_labels() {
    let tasks = EstimationModule::RatingImplementation.default_tasks();
    let costed = compute_task_costs(&tasks);
    assert_eq!(costed.len(), tasks.len());
    for (entry, costed) in tasks.iter().zip(&costed) {
        assert_eq!(entry.label, costed.label);
        assert_eq!(entry.quantity * entry.rate, costed.cost);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SCALING FACTOR
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_scaling_factor_known_values() {
    assert_eq!(compute_scaling_factor(1000.0, BASE_DATA_POINT).unwrap(), 1.0);
    assert_eq!(compute_scaling_factor(4000.0, BASE_DATA_POINT).unwrap(), 2.0);
    assert_eq!(compute_scaling_factor(0.0, BASE_DATA_POINT).unwrap(), 0.0);
}

#[test]
fn test_scaling_factor_negative_ratio_is_domain_error() {
    let err = compute_scaling_factor(-1000.0, BASE_DATA_POINT).unwrap_err();
    assert!(matches!(err, EstimatorError::Domain(_)));
    assert!(err.to_string().starts_with("Domain error"));
}

// ═══════════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_single_resource_base_cost() {
    let costed = compute_resource_costs(&rows(vec![ResourceEntry::new(
        "Business Analyst",
        1.0,
        480.0,
        32.18,
        Location::Offshore,
    )]))
    .unwrap();
    assert!((compute_base_cost(&costed) - 15446.4).abs() < 1e-6);
}

#[test]
fn test_default_roster_base_cost() {
    let costed = compute_resource_costs(&rows(default_resources())).unwrap();
    assert!((compute_base_cost(&costed) - 221404.8).abs() < 1e-6);
}

#[test]
fn test_missing_field_names_all_missing_columns() {
    let mut roster = rows(default_resources());
    roster[2].hours = None;
    roster[4].rate = None;

    let err = compute_resource_costs(&roster).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation error: Missing resource fields: hours, rate"
    );
}

#[test]
fn test_zero_fallback_keeps_rows_and_zeroes_every_cost() {
    let mut roster = rows(default_resources());
    roster[0].count = None;

    let (costed, err) = resource_costs_or_zero(&roster);
    assert!(matches!(err, Some(EstimatorError::Validation(_))));
    assert_eq!(costed.len(), roster.len());
    assert!(costed.iter().all(|r| r.cost == 0.0));
    assert_eq!(costed[1].row, roster[1]);
}

#[test]
fn test_zero_fallback_is_strict_result_when_complete() {
    let roster = rows(default_resources());
    let (costed, err) = resource_costs_or_zero(&roster);
    assert!(err.is_none());
    assert_eq!(costed, compute_resource_costs(&roster).unwrap());
}

// ═══════════════════════════════════════════════════════════════════════════
// FINAL ESTIMATE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_final_estimate_end_to_end_values() {
    let result = compute_final_estimate(1000.0, 2.0, 0.6, 0.5);
    assert_eq!(result.base_cost, 1000.0);
    assert_eq!(result.scaling_factor, 2.0);
    assert_eq!(result.adjusted_cost, 2000.0);
    assert_eq!(result.platform_cost, 1200.0);
    assert_eq!(result.profit, 1000.0);
    assert_eq!(result.final_estimate, 4200.0);
}

#[test]
fn test_final_estimate_is_bit_identical_across_calls() {
    let a = compute_final_estimate(221404.8, 1.0099504938362078, 0.6, 0.5);
    let b = compute_final_estimate(221404.8, 1.0099504938362078, 0.6, 0.5);
    assert_eq!(a.final_estimate.to_bits(), b.final_estimate.to_bits());
    assert_eq!(a.adjusted_cost.to_bits(), b.adjusted_cost.to_bits());
    assert_eq!(a, b);
}

#[test]
fn test_final_estimate_propagates_non_finite() {
    let result = compute_final_estimate(f64::INFINITY, 1.0, 0.6, 0.5);
    assert!(result.final_estimate.is_infinite());
}

// ═══════════════════════════════════════════════════════════════════════════
// FULL CASCADE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_rule_template_cascade() {
    let input = EstimationModule::RuleImplementation.template();
    let report = estimate(&input).unwrap();
    let result = report.result;

    assert!((result.revised_data_point - 1020.0).abs() < 1e-9);
    assert!((result.scaling_factor - 1.02f64.sqrt()).abs() < 1e-12);
    assert!((result.base_cost - 221404.8).abs() < 1e-6);
    assert_eq!(result.adjusted_cost, result.base_cost * result.scaling_factor);
    assert_eq!(
        result.final_estimate,
        result.adjusted_cost + result.platform_cost + result.profit
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn test_cascade_with_override_and_missing_roster_field() {
    let mut input = EstimationModule::DataTransformation.template();
    input.adjustments.override_scaling_factor = Some(1.0);
    input.resources[3].rate = None;

    let report = estimate(&input).unwrap();
    assert_eq!(report.result.base_cost, 0.0);
    assert_eq!(report.result.final_estimate, 0.0);
    assert_eq!(report.warnings.len(), 1);
    // The aggregate is independent of the roster
    assert_eq!(report.result.revised_data_point, 5000.0 * 9_000_000_000.0);
}
