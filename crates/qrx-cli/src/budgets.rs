//! `qrx budgets` command implementation.

use anyhow::Result;
use qrx_encode::{Density, FragmentPolicy};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct BudgetRow {
    density: Density,
    #[serde(flatten)]
    policy: FragmentPolicy,
}

/// Print the fragment budget for every density as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn run() -> Result<()> {
    let rows: Vec<BudgetRow> = Density::ALL
        .into_iter()
        .map(|density| BudgetRow {
            density,
            policy: FragmentPolicy::for_density(density),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
