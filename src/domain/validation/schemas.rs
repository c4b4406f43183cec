use super::rules::{FieldRule, PartRules, RuleKey};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Password complexity: at least one lowercase letter, one uppercase letter,
/// one digit and one of `@$!%*?&`, nothing outside those classes, and at
/// least eight characters.
pub fn validate_password(password: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c);

    password.chars().count() >= PASSWORD_MIN_LENGTH
        && password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

pub fn id() -> FieldRule {
    FieldRule::string()
        .uuid()
        .required()
        .message(RuleKey::Uuid, "Invalid ID format. Must be a UUID.")
        .message(RuleKey::Required, "ID is required.")
}

pub fn email() -> FieldRule {
    FieldRule::string()
        .email()
        .required()
        .message(RuleKey::Email, "Invalid email address format.")
        .message(RuleKey::Required, "Email is required.")
}

pub fn password() -> FieldRule {
    FieldRule::string()
        .min_length(PASSWORD_MIN_LENGTH)
        .matches(validate_password)
        .required()
        .message(
            RuleKey::MinLength,
            "Password must be at least 8 characters long.",
        )
        .message(
            RuleKey::Pattern,
            "Password must contain at least one uppercase letter, one lowercase letter, one digit and one special character.",
        )
        .message(RuleKey::Required, "Password is required.")
}

pub fn username() -> FieldRule {
    FieldRule::string()
        .alphanumeric()
        .min_length(3)
        .max_length(30)
        .required()
        .message(
            RuleKey::Alphanumeric,
            "Username may only contain letters and digits.",
        )
        .message(RuleKey::MinLength, "Username must be at least 3 characters long.")
        .message(RuleKey::MaxLength, "Username must be at most 30 characters long.")
        .message(RuleKey::Required, "Username is required.")
}

pub fn pagination_page() -> FieldRule {
    FieldRule::integer()
        .min(1)
        .default_value(DEFAULT_PAGE)
        .message(RuleKey::Base, "Page must be a number.")
        .message(RuleKey::Integer, "Page must be an integer.")
        .message(RuleKey::Min, "Page must be at least 1.")
}

pub fn pagination_limit() -> FieldRule {
    FieldRule::integer()
        .min(1)
        .max(MAX_LIMIT)
        .default_value(DEFAULT_LIMIT)
        .message(RuleKey::Base, "Limit must be a number.")
        .message(RuleKey::Integer, "Limit must be an integer.")
        .message(RuleKey::Min, "Limit must be at least 1.")
        .message(RuleKey::Max, "Limit must be at most 100.")
}

/// `page` and `limit` query rules
pub fn pagination() -> PartRules {
    PartRules::new()
        .field("page", pagination_page())
        .field("limit", pagination_limit())
}
