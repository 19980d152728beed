use scraper::Html;
use serde_json::{Map, Value};

use crate::types::{CanonicalVacancy, ProviderKind, SalaryRange};

/// Ordered field names tried for each canonical attribute.
///
/// Paths are evaluated left to right; the first usable value wins.
struct FieldAliases {
    id: &'static [&'static [&'static str]],
    title: &'static [&'static [&'static str]],
    link: &'static [&'static [&'static str]],
    requirements: &'static [&'static [&'static str]],
    currency: &'static [&'static [&'static str]],
    nested_salary: &'static str,
    flat_salary: (&'static str, &'static str),
}

const ALIASES: FieldAliases = FieldAliases {
    id: &[&["id"]],
    title: &[&["name"], &["profession"]],
    link: &[&["alternate_url"], &["link"]],
    requirements: &[&["snippet", "requirement"], &["work"]],
    currency: &[&["salary", "currency"], &["currency"]],
    nested_salary: "salary",
    flat_salary: ("payment_from", "payment_to"),
};

/// Converts loosely typed provider records into [`CanonicalVacancy`] values.
///
/// Normalization never fails: absent or malformed fields fall back to
/// defaults.
pub struct Normalizer;

impl Normalizer {
    /// Normalizes a single raw record. `provider` only tags the result.
    pub fn normalize(provider: Option<ProviderKind>, raw: &Value) -> CanonicalVacancy {
        let Some(fields) = raw.as_object() else {
            return CanonicalVacancy {
                id: None,
                provider,
                title: String::new(),
                link: String::new(),
                salary_from: None,
                salary_to: None,
                currency: None,
                requirements: String::new(),
                raw: raw.clone(),
            };
        };

        let link = first_string(fields, ALIASES.link).unwrap_or_default();
        let salary = extract_salary(fields);
        let requirements = extract_requirements(fields, &link);

        CanonicalVacancy {
            id: first_identifier(fields, ALIASES.id),
            provider,
            title: first_string(fields, ALIASES.title).unwrap_or_default(),
            link,
            salary_from: salary.from,
            salary_to: salary.to,
            currency: first_string(fields, ALIASES.currency),
            requirements,
            raw: raw.clone(),
        }
    }

    /// Normalizes every record of one provider response.
    pub fn normalize_all(provider: Option<ProviderKind>, raw: &[Value]) -> Vec<CanonicalVacancy> {
        raw.iter()
            .map(|record| Self::normalize(provider, record))
            .collect()
    }
}

/// Text substituted when a vacancy carries no usable requirement text.
pub fn requirements_fallback(link: &str) -> String {
    if link.is_empty() {
        "Requirements are not listed, see the original vacancy".to_string()
    } else {
        format!("Requirements are not listed, see the vacancy at {link}")
    }
}

/// Converts HTML fragments to whitespace-collapsed plain text.
///
/// Returns `None` when nothing readable remains.
pub fn markup_to_text(source: &str) -> Option<String> {
    let text = if source.contains('<') || source.contains('&') {
        let fragment = Html::parse_fragment(source);
        fragment.root_element().text().collect::<String>()
    } else {
        source.to_string()
    };

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Nested `salary` bounds win when at least one of them parses; otherwise the
/// flat `payment_*` pair is used.
fn extract_salary(fields: &Map<String, Value>) -> SalaryRange {
    if let Some(Value::Object(nested)) = fields.get(ALIASES.nested_salary) {
        let range = SalaryRange::new(
            nested.get("from").and_then(salary_bound),
            nested.get("to").and_then(salary_bound),
        );
        if !range.is_unspecified() {
            return range;
        }
    }

    let (from_key, to_key) = ALIASES.flat_salary;
    SalaryRange::new(
        fields.get(from_key).and_then(salary_bound),
        fields.get(to_key).and_then(salary_bound),
    )
}

fn extract_requirements(fields: &Map<String, Value>, link: &str) -> String {
    first_string(fields, ALIASES.requirements)
        .and_then(|source| markup_to_text(&source))
        .unwrap_or_else(|| requirements_fallback(link))
}

/// Accepts integer numbers, floats (truncated) and integer strings.
fn salary_bound(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn lookup<'a>(fields: &'a Map<String, Value>, path: &[&str]) -> Option<&'a Value> {
    let (head, rest) = path.split_first()?;
    rest.iter()
        .try_fold(fields.get(*head)?, |value, key| value.get(*key))
}

fn first_string(fields: &Map<String, Value>, paths: &[&[&str]]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| lookup(fields, path))
        .filter_map(Value::as_str)
        .find(|value| !value.trim().is_empty())
        .map(str::to_string)
}

fn first_identifier(fields: &Map<String, Value>, paths: &[&[&str]]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| lookup(fields, path))
        .find_map(|value| match value {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
}
