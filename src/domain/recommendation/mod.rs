pub mod rules;
pub mod types;

pub use rules::{
    Comparison, Condition, FallbackAction, Fallbacks, Rule, RuleContext, RuleSettings, RuleTable,
};
pub use types::{InterventionCategory, Priority, Recommendation};
