// Customer inputs
pub mod customer;

// Feature registry and scaling
pub mod ml;

// Churn risk tiers
pub mod churn;

// Health scoring types
pub mod health;

// Intervention rules
pub mod recommendation;

// Combined per-customer output
pub mod assessment;

// Domain-specific error types
pub mod errors;
