// src/validation/schema.rs
//
// Declarative field rules and the collect-all validator.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::domain::dates::parse_calendar_date;
use crate::validation::errors::ValidationError;

/// A submitted form: field-path → raw JSON value.
pub type Record = Map<String, Value>;

/// One check applied to a field. Each rule carries the message shown when it
/// fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Present, not null, not an empty string.
    Required(String),
    /// At least `n` characters.
    MinLength(usize, String),
    /// Looks like an e-mail address.
    Email(String),
    /// A calendar date (`YYYY-MM-DD` or an ISO datetime).
    Date(String),
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required(message.into())
    }

    pub fn min_length(n: usize, message: impl Into<String>) -> Self {
        Rule::MinLength(n, message.into())
    }

    pub fn email(message: impl Into<String>) -> Self {
        Rule::Email(message.into())
    }

    pub fn date(message: impl Into<String>) -> Self {
        Rule::Date(message.into())
    }

    fn message(&self) -> &str {
        match self {
            Rule::Required(m) | Rule::MinLength(_, m) | Rule::Email(m) | Rule::Date(m) => m,
        }
    }

    /// `true` when the rule holds. Shape rules hold vacuously on absent
    /// values; absence is `Required`'s business.
    fn check(&self, value: Option<&Value>) -> bool {
        let present = value.filter(|v| !is_blank(v));

        match (self, present) {
            (Rule::Required(_), present) => present.is_some(),
            (_, None) => true,
            (Rule::MinLength(n, _), Some(v)) => v
                .as_str()
                .map(|s| s.chars().count() >= *n)
                .unwrap_or(false),
            (Rule::Email(_), Some(v)) => v.as_str().map(is_email).unwrap_or(false),
            (Rule::Date(_), Some(v)) => v
                .as_str()
                .map(|s| parse_calendar_date(s).is_some())
                .unwrap_or(false),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("email pattern is valid")
    })
}

fn is_email(raw: &str) -> bool {
    email_pattern().is_match(raw)
}

#[derive(Debug, Clone)]
struct FieldSpec {
    path: String,
    rules: Vec<Rule>,
}

/// Ordered set of fields, each with its ordered rules.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    fields: Vec<FieldSpec>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `path` with its rules, evaluated in the given order.
    pub fn field(mut self, path: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldSpec {
            path: path.into(),
            rules,
        });
        self
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Checks every declared field of `input` against `schema`.
///
/// Does not stop at the first problem: all failing fields are reported
/// together, each with the message of its first failing rule. On success the
/// input is handed back unchanged.
pub fn validate(schema: &FieldRules, input: Record) -> Result<Record, ValidationError> {
    let mut errors = ValidationError::new();

    for field in &schema.fields {
        let value = input.get(&field.path);
        if let Some(failed) = field.rules.iter().find(|rule| !rule.check(value)) {
            errors.insert(field.path.clone(), failed.message());
        }
    }

    if errors.is_empty() {
        Ok(input)
    } else {
        log::debug!("validation rejected fields: {}", errors);
        Err(errors)
    }
}
