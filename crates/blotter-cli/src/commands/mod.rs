//! CLI command implementations.

pub mod plan;
pub mod profile;
pub mod provision;
pub mod verify;

use std::error::Error;
use std::path::Path;

use blotter::{Profiler, ProvisioningPlan, TypePlanner};

use crate::cli::PlanArgs;

/// Build the provisioning plan the command will render or execute.
///
/// With `--infer` and a data file, column types are derived from the file's
/// profile; otherwise the built-in crime-report table definition is used
/// with the names from `args`.
pub fn build_plan(file: Option<&Path>, args: &PlanArgs) -> Result<ProvisioningPlan, Box<dyn Error>> {
    let mut plan = match (args.infer, file) {
        (true, Some(path)) => {
            let profile = Profiler::new().profile_file(path)?;
            ProvisioningPlan::from_profile(
                args.database.as_str(),
                args.schema.as_str(),
                args.table.as_str(),
                &profile,
                &TypePlanner::new(),
            )
        }
        (true, None) => {
            return Err("--infer requires a data file argument".into());
        }
        (false, _) => {
            let mut plan = ProvisioningPlan::crime_reports();
            plan.database = args.database.clone();
            plan.schema = args.schema.clone();
            plan.table.name = args.table.clone();
            plan
        }
    };

    if let Some(password) = args.resolve_analyst_password() {
        plan = plan.with_password("data_analyst", password);
    }
    if let Some(password) = args.resolve_scientist_password() {
        plan = plan.with_password("data_scientist", password);
    }

    Ok(plan)
}
