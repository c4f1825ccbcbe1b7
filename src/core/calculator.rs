use crate::error::{EstimatorError, EstimatorResult};
use crate::types::{
    CostedResource, CostedTask, EstimateInput, EstimateReport, EstimationResult, ResourceRow,
    TaskEntry,
};
use tracing::{debug, warn};

/// Baseline the multiplicative task aggregate is normalised against
pub const BASE_DATA_POINT: f64 = 1000.0;

/// Cost each task entry (quantity × rate)
pub fn compute_task_costs(entries: &[TaskEntry]) -> Vec<CostedTask> {
    entries.iter().map(CostedTask::from).collect()
}

/// Multiply all task costs together.
///
/// A cost ≤ 0 contributes a factor of exactly 1.0 so that a single empty or
/// negative task can neither zero the aggregate nor flip its sign. An empty
/// task list yields 1.0.
pub fn compute_revised_data_point(entries: &[TaskEntry]) -> f64 {
    entries.iter().fold(1.0, |acc, entry| {
        let cost = entry.cost();
        acc * if cost > 0.0 { cost } else { 1.0 }
    })
}

/// `sqrt(revised_data_point / base_data_point)`
///
/// Fails with [`EstimatorError::Domain`] when the ratio is negative (or not a
/// number) instead of yielding NaN.
pub fn compute_scaling_factor(
    revised_data_point: f64,
    base_data_point: f64,
) -> EstimatorResult<f64> {
    let ratio = revised_data_point / base_data_point;
    if ratio.is_nan() || ratio < 0.0 {
        return Err(EstimatorError::Domain(format!(
            "Cannot take square root of {} / {} = {}",
            revised_data_point, base_data_point, ratio
        )));
    }
    Ok(ratio.sqrt())
}

/// Cost each roster row (count × hours × rate).
///
/// Fails with [`EstimatorError::Validation`] naming the missing fields when
/// any row lacks count, hours or rate.
pub fn compute_resource_costs(rows: &[ResourceRow]) -> EstimatorResult<Vec<CostedResource>> {
    match rows
        .iter()
        .map(ResourceRow::to_entry)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(entries) => Ok(rows
            .iter()
            .zip(entries)
            .map(|(row, entry)| CostedResource {
                row: row.clone(),
                cost: entry.cost(),
            })
            .collect()),
        Err(_) => Err(EstimatorError::Validation(format!(
            "Missing resource fields: {}",
            missing_resource_fields(rows).join(", ")
        ))),
    }
}

/// Cost the roster with the all-or-nothing fallback: if any required field
/// is missing anywhere, every row is costed at 0 and the validation error
/// is handed back alongside.
pub fn resource_costs_or_zero(
    rows: &[ResourceRow],
) -> (Vec<CostedResource>, Option<EstimatorError>) {
    match compute_resource_costs(rows) {
        Ok(costed) => (costed, None),
        Err(err) => {
            warn!(error = %err, rows = rows.len(), "resource roster costed at zero");
            let zeroed = rows
                .iter()
                .map(|row| CostedResource {
                    row: row.clone(),
                    cost: 0.0,
                })
                .collect();
            (zeroed, Some(err))
        }
    }
}

/// Sum of roster costs
pub fn compute_base_cost(resources: &[CostedResource]) -> f64 {
    resources.iter().map(|r| r.cost).sum()
}

/// Apply the scaling factor and the negotiation markups to a base cost.
///
/// `revised_data_point` is not known here and is left at 0.
pub fn compute_final_estimate(
    base_cost: f64,
    override_scaling_factor: f64,
    platform_multiplier: f64,
    profit_margin: f64,
) -> EstimationResult {
    let adjusted_cost = base_cost * override_scaling_factor;
    let platform_cost = adjusted_cost * platform_multiplier;
    let profit = adjusted_cost * profit_margin;
    let final_estimate = adjusted_cost + platform_cost + profit;

    EstimationResult {
        revised_data_point: 0.0,
        scaling_factor: override_scaling_factor,
        base_cost,
        adjusted_cost,
        platform_cost,
        profit,
        final_estimate,
    }
}

/// Run the whole cascade for one estimate input
pub fn estimate(input: &EstimateInput) -> EstimatorResult<EstimateReport> {
    let tasks = compute_task_costs(&input.tasks);
    let revised_data_point = compute_revised_data_point(&input.tasks);
    let computed_factor = compute_scaling_factor(revised_data_point, BASE_DATA_POINT)?;
    debug!(
        module = %input.module,
        revised_data_point,
        scaling_factor = computed_factor,
        "task aggregate computed"
    );

    let (resources, fallback) = resource_costs_or_zero(&input.resources);
    let warnings = fallback.map(|e| e.to_string()).into_iter().collect();

    let base_cost = compute_base_cost(&resources);
    let adjustments = &input.adjustments;
    let factor = adjustments
        .override_scaling_factor
        .unwrap_or(computed_factor);

    let mut result = compute_final_estimate(
        base_cost,
        factor,
        adjustments.platform_multiplier,
        adjustments.profit_margin,
    );
    result.revised_data_point = revised_data_point;
    debug!(base_cost, final_estimate = result.final_estimate, "estimate computed");

    Ok(EstimateReport {
        module: input.module.clone(),
        project: input.project.clone(),
        tasks,
        resources,
        result,
        warnings,
    })
}

/// Missing required fields across the whole roster, deduplicated, in
/// count/hours/rate order
fn missing_resource_fields(rows: &[ResourceRow]) -> Vec<&'static str> {
    let mut missing: Vec<&'static str> = Vec::new();
    for field in rows.iter().flat_map(|r| r.missing_fields()) {
        if !missing.contains(&field) {
            missing.push(field);
        }
    }
    missing.sort_by_key(|f| match *f {
        "count" => 0,
        "hours" => 1,
        _ => 2,
    });
    missing
}
