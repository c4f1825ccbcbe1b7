//! Core estimation arithmetic: task aggregate, scaling factor, roster costing

pub mod calculator;

pub use calculator::{
    compute_base_cost, compute_final_estimate, compute_resource_costs,
    compute_revised_data_point, compute_scaling_factor, compute_task_costs, estimate,
    resource_costs_or_zero, BASE_DATA_POINT,
};
