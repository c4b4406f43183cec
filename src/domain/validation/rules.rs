use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;
use validator::{validate_email, validate_length, validate_range};

/// Identifies a rule so its default message can be overridden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    Required,
    Base,
    Integer,
    MinLength,
    MaxLength,
    Min,
    Max,
    Pattern,
    Alphanumeric,
    Email,
    Uuid,
    OneOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
}

#[derive(Debug, Clone)]
enum Constraint {
    MinLength(usize),
    MaxLength(usize),
    Predicate(fn(&str) -> bool),
    Alphanumeric,
    Email,
    Uuid,
    OneOf(Vec<String>),
    Min(i64),
    Max(i64),
}

impl Constraint {
    fn key(&self) -> RuleKey {
        match self {
            Self::MinLength(_) => RuleKey::MinLength,
            Self::MaxLength(_) => RuleKey::MaxLength,
            Self::Predicate(_) => RuleKey::Pattern,
            Self::Alphanumeric => RuleKey::Alphanumeric,
            Self::Email => RuleKey::Email,
            Self::Uuid => RuleKey::Uuid,
            Self::OneOf(_) => RuleKey::OneOf,
            Self::Min(_) => RuleKey::Min,
            Self::Max(_) => RuleKey::Max,
        }
    }

    fn default_message(&self, label: &str) -> String {
        match self {
            Self::MinLength(n) => {
                format!("\"{label}\" length must be at least {n} characters long")
            }
            Self::MaxLength(n) => {
                format!("\"{label}\" length must be less than or equal to {n} characters long")
            }
            Self::Predicate(_) => format!("\"{label}\" does not match the required pattern"),
            Self::Alphanumeric => format!("\"{label}\" must only contain alpha-numeric characters"),
            Self::Email => format!("\"{label}\" must be a valid email"),
            Self::Uuid => format!("\"{label}\" must be a valid GUID"),
            Self::OneOf(values) => format!("\"{label}\" must be one of [{}]", values.join(", ")),
            Self::Min(n) => format!("\"{label}\" must be greater than or equal to {n}"),
            Self::Max(n) => format!("\"{label}\" must be less than or equal to {n}"),
        }
    }

    fn holds_for_str(&self, value: &str) -> bool {
        match self {
            Self::MinLength(n) => validate_length(value, Some(*n as u64), None, None),
            Self::MaxLength(n) => validate_length(value, None, Some(*n as u64), None),
            Self::Predicate(check) => check(value),
            Self::Alphanumeric => value.chars().all(|c| c.is_ascii_alphanumeric()),
            Self::Email => is_email(value),
            Self::Uuid => Uuid::parse_str(value).is_ok(),
            Self::OneOf(values) => values.iter().any(|v| v == value),
            Self::Min(_) | Self::Max(_) => true,
        }
    }

    fn holds_for_int(&self, value: i64) -> bool {
        match self {
            Self::Min(n) => validate_range(value as f64, Some(*n as f64), None),
            Self::Max(n) => validate_range(value as f64, None, Some(*n as f64)),
            Self::OneOf(values) => values.iter().any(|v| v == &value.to_string()),
            _ => true,
        }
    }
}

/// Address with a dotted domain and a local part free of empty dot segments,
/// which the crate's local-part check lets through
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    validate_email(value)
        && domain.contains('.')
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
}

/// Rule-set for a single field
#[derive(Debug, Clone)]
pub struct FieldRule {
    kind: FieldKind,
    required: bool,
    default: Option<Value>,
    constraints: Vec<Constraint>,
    messages: HashMap<RuleKey, String>,
}

impl FieldRule {
    pub fn string() -> Self {
        Self::of_kind(FieldKind::String)
    }

    /// Integer field; numeric strings (query and path values) are coerced
    pub fn integer() -> Self {
        Self::of_kind(FieldKind::Integer)
    }

    fn of_kind(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
            constraints: Vec::new(),
            messages: HashMap::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn min_length(self, n: usize) -> Self {
        self.with(Constraint::MinLength(n))
    }

    pub fn max_length(self, n: usize) -> Self {
        self.with(Constraint::MaxLength(n))
    }

    /// Pattern check expressed as a predicate
    pub fn matches(self, check: fn(&str) -> bool) -> Self {
        self.with(Constraint::Predicate(check))
    }

    pub fn alphanumeric(self) -> Self {
        self.with(Constraint::Alphanumeric)
    }

    pub fn email(self) -> Self {
        self.with(Constraint::Email)
    }

    pub fn uuid(self) -> Self {
        self.with(Constraint::Uuid)
    }

    pub fn one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(Constraint::OneOf(values.into_iter().map(Into::into).collect()))
    }

    pub fn min(self, n: i64) -> Self {
        self.with(Constraint::Min(n))
    }

    pub fn max(self, n: i64) -> Self {
        self.with(Constraint::Max(n))
    }

    pub fn message(mut self, key: RuleKey, message: impl Into<String>) -> Self {
        self.messages.insert(key, message.into());
        self
    }

    fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn message_for(&self, key: RuleKey, fallback: impl FnOnce() -> String) -> String {
        self.messages.get(&key).cloned().unwrap_or_else(fallback)
    }

    /// Validate one field value.
    ///
    /// Returns the coerced value (or the default when absent) and every
    /// violation found. A missing required field or a type mismatch stops
    /// evaluation of the remaining constraints for that field.
    pub fn check(&self, field: &str, value: Option<&Value>) -> (Option<Value>, Vec<String>) {
        let value = match value {
            None | Some(Value::Null) => {
                if self.required {
                    let msg =
                        self.message_for(RuleKey::Required, || format!("\"{field}\" is required"));
                    return (None, vec![msg]);
                }
                return (self.default.clone(), Vec::new());
            }
            Some(value) => value,
        };

        match self.kind {
            FieldKind::String => self.check_string(field, value),
            FieldKind::Integer => self.check_integer(field, value),
        }
    }

    fn check_string(&self, field: &str, value: &Value) -> (Option<Value>, Vec<String>) {
        let Some(text) = value.as_str() else {
            let msg = self.message_for(RuleKey::Base, || format!("\"{field}\" must be a string"));
            return (None, vec![msg]);
        };

        if text.is_empty() && self.required {
            let msg = self.message_for(RuleKey::Required, || {
                format!("\"{field}\" is not allowed to be empty")
            });
            return (None, vec![msg]);
        }

        let violations = self
            .constraints
            .iter()
            .filter(|c| !c.holds_for_str(text))
            .map(|c| self.message_for(c.key(), || c.default_message(field)))
            .collect();

        (Some(value.clone()), violations)
    }

    fn check_integer(&self, field: &str, value: &Value) -> (Option<Value>, Vec<String>) {
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        let Some(number) = number.filter(|n| n.is_finite()) else {
            let msg = self.message_for(RuleKey::Base, || format!("\"{field}\" must be a number"));
            return (None, vec![msg]);
        };

        if number.fract() != 0.0 {
            let msg =
                self.message_for(RuleKey::Integer, || format!("\"{field}\" must be an integer"));
            return (None, vec![msg]);
        }

        let integer = number as i64;
        let violations = self
            .constraints
            .iter()
            .filter(|c| !c.holds_for_int(integer))
            .map(|c| self.message_for(c.key(), || c.default_message(field)))
            .collect();

        (Some(Value::from(integer)), violations)
    }
}

/// Outcome of validating one request part
#[derive(Debug, Default)]
pub struct PartOutcome {
    pub values: Map<String, Value>,
    pub violations: Vec<String>,
}

/// Field rules for one request part (body, query or params)
#[derive(Debug, Clone, Default)]
pub struct PartRules {
    fields: Vec<(String, FieldRule)>,
    allow_unknown: bool,
}

impl PartRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.push((name.into(), rule));
        self
    }

    /// Keys without a rule are passed through instead of rejected
    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    pub fn check(&self, input: &Value) -> PartOutcome {
        let empty = Map::new();
        let object = match input {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return PartOutcome {
                    values: Map::new(),
                    violations: vec!["\"value\" must be of type object".to_string()],
                }
            }
        };

        let mut outcome = PartOutcome::default();

        for (name, rule) in &self.fields {
            let (value, violations) = rule.check(name, object.get(name));
            if let Some(value) = value {
                outcome.values.insert(name.clone(), value);
            }
            outcome.violations.extend(violations);
        }

        for (key, value) in object {
            if self.fields.iter().any(|(name, _)| name == key) {
                continue;
            }
            if self.allow_unknown {
                outcome.values.insert(key.clone(), value.clone());
            } else {
                outcome.violations.push(format!("\"{key}\" is not allowed"));
            }
        }

        outcome
    }
}

/// Per-part schema; absent parts are not validated
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    pub body: Option<PartRules>,
    pub query: Option<PartRules>,
    pub params: Option<PartRules>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, rules: PartRules) -> Self {
        self.body = Some(rules);
        self
    }

    pub fn query(mut self, rules: PartRules) -> Self {
        self.query = Some(rules);
        self
    }

    pub fn params(mut self, rules: PartRules) -> Self {
        self.params = Some(rules);
        self
    }
}
