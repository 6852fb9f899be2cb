use std::fmt;
use std::ops::RangeInclusive;

use super::ValidationResult;

/// When a rule reports relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Required fields are present.
    Presence,
    /// A single present field is well formed.
    Field,
    /// Several fields agree with each other.
    CrossField,
}

const STAGES: [Stage; 3] = [Stage::Presence, Stage::Field, Stage::CrossField];

type Check<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;

struct Rule<T: ?Sized> {
    field: String,
    stage: Stage,
    check: Check<T>,
}

/// Ordered rule set for inputs of type `T`.
pub struct Validator<T: ?Sized> {
    rules: Vec<Rule<T>>,
}

impl<T: ?Sized> Default for Validator<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T: ?Sized> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| (rule.stage, rule.field.as_str())))
            .finish()
    }
}

impl<T: ?Sized + 'static> Validator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom rule. `check` returns a message when the input is invalid.
    pub fn rule<F>(mut self, field: impl Into<String>, stage: Stage, check: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            field: field.into(),
            stage,
            check: Box::new(check),
        });
        self
    }

    /// The text field must not be blank.
    pub fn required<F>(self, field: impl Into<String>, get: F) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        let field = field.into();
        let message = format!("{} is required", field);
        self.rule(field, Stage::Presence, move |input| {
            get(input).trim().is_empty().then(|| message.clone())
        })
    }

    /// The field must be present (`is_present` returns true).
    pub fn present<F>(self, field: impl Into<String>, is_present: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let field = field.into();
        let message = format!("{} is required", field);
        self.rule(field, Stage::Presence, move |input| {
            (!is_present(input)).then(|| message.clone())
        })
    }

    /// The number, when present, must fall inside `range`.
    pub fn range<F>(self, field: impl Into<String>, get: F, range: RangeInclusive<i64>) -> Self
    where
        F: Fn(&T) -> Option<i64> + Send + Sync + 'static,
    {
        let field = field.into();
        let message = format!(
            "{} must be between {} and {}",
            field,
            range.start(),
            range.end()
        );
        self.rule(field, Stage::Field, move |input| match get(input) {
            Some(value) if !range.contains(&value) => Some(message.clone()),
            _ => None,
        })
    }

    /// The text field must be at most `max` characters long.
    pub fn max_len<F>(self, field: impl Into<String>, get: F, max: usize) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        let field = field.into();
        let message = format!("{} must be at most {} characters", field, max);
        self.rule(field, Stage::Field, move |input| {
            (get(input).chars().count() > max).then(|| message.clone())
        })
    }

    /// When both values are present, `later` must not come before `earlier`.
    pub fn ordered<D, F>(self, earlier: &str, later: &str, get: F) -> Self
    where
        D: PartialOrd + 'static,
        F: Fn(&T) -> (Option<D>, Option<D>) + Send + Sync + 'static,
    {
        let message = format!("{} must not be before {}", later, earlier);
        self.rule(later, Stage::CrossField, move |input| match get(input) {
            (Some(first), Some(second)) if second < first => Some(message.clone()),
            _ => None,
        })
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule and collect all violations.
    pub fn validate(&self, input: &T) -> ValidationResult {
        let mut result = ValidationResult::valid();
        for stage in STAGES {
            for rule in self.rules.iter().filter(|rule| rule.stage == stage) {
                if let Some(message) = (rule.check)(input) {
                    result.push(message);
                }
            }
        }
        result
    }
}
