pub mod rules;
pub mod schemas;

pub use rules::{FieldKind, FieldRule, PartOutcome, PartRules, RuleKey, ValidationSchema};
pub use schemas as common_schemas;
pub use schemas::validate_password;
