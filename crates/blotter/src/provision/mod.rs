//! Provisioning: plan modelling, SQL rendering, and execution.

mod executor;
mod plan;

pub use executor::{GrantRecord, Provisioner, VerificationReport};
pub use plan::{
    Phase, Privilege, ProvisioningPlan, RoleSpec, Statement, UserSpec, quote_ident, quote_literal,
};
