//! Full factorial designs
//!
//! The per-variant requirement becomes a per-cell requirement and the total
//! scales with the number of cells, so factorial results are packaged here
//! rather than by the general path.

use crate::result::{ceil_count, DesignOutcome, Notes, SampleSizeResult};
use power_core::{Error, Factor, FactorialParams, Result, StatisticalParams};
use tracing::debug;

/// Inflation applied to every cell when interactions must be detected
pub const INTERACTION_INFLATION: u64 = 4;

/// Number of cells, the product of all factor levels
pub fn total_cells(factors: &[Factor]) -> Result<u64> {
    factors.iter().try_fold(1u64, |cells, factor| {
        cells
            .checked_mul(factor.levels as u64)
            .ok_or_else(|| Error::Computation("factorial cell count overflows".to_string()))
    })
}

/// Package a factorial result from the per-cell requirement `n`
pub fn plan_factorial(
    n: f64,
    factorial: &FactorialParams,
    params: &StatisticalParams,
    mut notes: Notes,
) -> Result<SampleSizeResult> {
    let cells = total_cells(&factorial.factors)?;
    let cell_sample_size = ceil_count(n, "factorial cell sample size")?;
    let total = checked_product(cell_sample_size, cells)?;

    let layout = factorial
        .factors
        .iter()
        .map(|f| f.levels.to_string())
        .collect::<Vec<_>>()
        .join("×");
    notes.assume(format!(
        "Full factorial {layout} = {cells} cells, {cell_sample_size} units per cell"
    ));

    let interaction_sample_size = if factorial.detect_interaction {
        notes.assume(format!(
            "Interaction effects: per-cell size inflated {INTERACTION_INFLATION}×"
        ));
        Some(checked_product(total, INTERACTION_INFLATION)?)
    } else {
        None
    };
    debug!(cells, cell_sample_size, total, ?interaction_sample_size, "factorial sizing");

    Ok(SampleSizeResult::new(
        cell_sample_size,
        interaction_sample_size.unwrap_or(total),
        params.power,
        params.mde,
        notes,
        DesignOutcome::Factorial {
            total_cells: cells,
            cell_sample_size,
            interaction_sample_size,
        },
    ))
}

fn checked_product(a: u64, b: u64) -> Result<u64> {
    a.checked_mul(b)
        .ok_or_else(|| Error::Computation("factorial sample size overflows".to_string()))
}
