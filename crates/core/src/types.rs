use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label used when neither salary bound is known.
pub const SALARY_NOT_SPECIFIED: &str = "salary not specified";

/// Job boards the application knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    HeadHunter,
    SuperJob,
}

impl ProviderKind {
    /// Returns the short code used on the command line and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeadHunter => "hh",
            Self::SuperJob => "sj",
        }
    }

    /// Human readable board name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::HeadHunter => "HeadHunter",
            Self::SuperJob => "SuperJob",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Salary bounds as advertised by a provider. Either side may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl SalaryRange {
    pub fn new(from: Option<i64>, to: Option<i64>) -> Self {
        Self { from, to }
    }

    /// Returns `true` when neither bound is known.
    pub fn is_unspecified(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Display label for the range.
    pub fn label(&self) -> String {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from == to => format!("from {from}"),
            (Some(from), Some(to)) => format!("from {from} to {to}"),
            (Some(from), None) => format!("from {from}"),
            (None, Some(to)) => format!("up to {to}"),
            (None, None) => SALARY_NOT_SPECIFIED.to_string(),
        }
    }

    /// Ranking metric: the average of the known bounds, `0.0` when none are known.
    pub fn metric(&self) -> f64 {
        let known: Vec<i64> = [self.from, self.to].into_iter().flatten().collect();
        if known.is_empty() {
            return 0.0;
        }
        known.iter().map(|value| *value as f64).sum::<f64>() / known.len() as f64
    }
}

/// Provider agnostic job posting used by filtering and ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalVacancy {
    pub id: Option<String>,
    pub provider: Option<ProviderKind>,
    pub title: String,
    pub link: String,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub currency: Option<String>,
    pub requirements: String,
    /// Every field of the original provider record.
    pub raw: Value,
}

impl CanonicalVacancy {
    pub fn salary(&self) -> SalaryRange {
        SalaryRange::new(self.salary_from, self.salary_to)
    }

    pub fn salary_label(&self) -> String {
        self.salary().label()
    }

    pub fn salary_metric(&self) -> f64 {
        self.salary().metric()
    }

    /// Flattened rendering of all raw fields, used for keyword matching.
    pub fn raw_text(&self) -> String {
        match &self.raw {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Salary block persisted with each stored entry.
///
/// Always written as `{from, to, label, average}`. Older files that stored a
/// bare label or a bare number are accepted on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredSalaryRepr")]
pub struct StoredSalary {
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub label: String,
    pub average: f64,
}

impl StoredSalary {
    pub fn range(&self) -> SalaryRange {
        SalaryRange::new(self.from, self.to)
    }

    /// Recovers bounds from a label such as `"from 100 to 200"` or `"up to 90000"`.
    ///
    /// Unrecognized text keeps the label with no bounds.
    pub fn from_label(label: &str) -> Self {
        let text = label.trim();
        let range = if let Some(rest) = text.strip_prefix("up to ") {
            SalaryRange::new(None, leading_amount(rest))
        } else if let Some(rest) = text.strip_prefix("from ") {
            match rest.split_once(" to ") {
                Some((from, to)) => SalaryRange::new(leading_amount(from), leading_amount(to)),
                None => SalaryRange::new(leading_amount(rest), None),
            }
        } else {
            SalaryRange::default()
        };

        Self {
            from: range.from,
            to: range.to,
            label: label.to_string(),
            average: range.metric(),
        }
    }
}

fn leading_amount(text: &str) -> Option<i64> {
    text.split_whitespace().next()?.parse().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSalaryRepr {
    Structured {
        #[serde(default)]
        from: Option<i64>,
        #[serde(default)]
        to: Option<i64>,
        #[serde(default)]
        label: Option<String>,
    },
    Label(String),
    Amount(f64),
    Unset,
}

impl From<StoredSalaryRepr> for StoredSalary {
    fn from(repr: StoredSalaryRepr) -> Self {
        match repr {
            StoredSalaryRepr::Structured { from, to, label } => {
                let range = SalaryRange::new(from, to);
                Self {
                    from,
                    to,
                    label: label.unwrap_or_else(|| range.label()),
                    average: range.metric(),
                }
            }
            StoredSalaryRepr::Label(label) => Self::from_label(&label),
            StoredSalaryRepr::Amount(amount) if amount.is_finite() => {
                Self::from(SalaryRange::new(Some(amount as i64), None))
            }
            StoredSalaryRepr::Amount(_) | StoredSalaryRepr::Unset => {
                Self::from(SalaryRange::default())
            }
        }
    }
}

impl From<SalaryRange> for StoredSalary {
    fn from(range: SalaryRange) -> Self {
        Self {
            from: range.from,
            to: range.to,
            label: range.label(),
            average: range.metric(),
        }
    }
}

/// JSON projection of a vacancy kept in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub salary: StoredSalary,
    #[serde(default)]
    pub requirements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_covers_every_bound_combination() {
        assert_eq!(
            SalaryRange::new(Some(100000), Some(150000)).label(),
            "from 100000 to 150000"
        );
        assert_eq!(SalaryRange::new(Some(50000), Some(50000)).label(), "from 50000");
        assert_eq!(SalaryRange::new(Some(30000), None).label(), "from 30000");
        assert_eq!(SalaryRange::new(None, Some(90000)).label(), "up to 90000");
        assert_eq!(SalaryRange::default().label(), SALARY_NOT_SPECIFIED);
    }

    #[test]
    fn metric_averages_known_bounds() {
        assert_eq!(SalaryRange::new(Some(100000), Some(150000)).metric(), 125000.0);
        assert_eq!(SalaryRange::new(None, Some(90000)).metric(), 90000.0);
        assert_eq!(SalaryRange::default().metric(), 0.0);
    }

    #[test]
    fn stored_salary_accepts_legacy_shapes() {
        let label: StoredSalary = serde_json::from_str(r#""from 100 to 200""#).expect("label");
        assert_eq!(label.range(), SalaryRange::new(Some(100), Some(200)));
        assert_eq!(label.label, "from 100 to 200");
        assert_eq!(label.average, 150.0);

        let upper: StoredSalary = serde_json::from_str(r#""up to 90000 руб.""#).expect("label");
        assert_eq!(upper.range(), SalaryRange::new(None, Some(90000)));

        let text: StoredSalary =
            serde_json::from_str(&format!("\"{SALARY_NOT_SPECIFIED}\"")).expect("label");
        assert!(text.range().is_unspecified());
        assert_eq!(text.label, SALARY_NOT_SPECIFIED);

        let amount: StoredSalary = serde_json::from_str("125000").expect("amount");
        assert_eq!(amount.from, Some(125000));
        assert_eq!(amount.average, 125000.0);

        let unset: StoredSalary = serde_json::from_str("null").expect("null");
        assert_eq!(unset, StoredSalary::from(SalaryRange::default()));
    }

    #[test]
    fn structured_salary_recomputes_average_from_bounds() {
        let salary: StoredSalary =
            serde_json::from_str(r#"{"from": 10, "to": 30, "average": 999.0}"#).expect("salary");
        assert_eq!(salary.average, 20.0);
        assert_eq!(salary.label, "from 10 to 30");
    }

    #[test]
    fn stored_entry_serializes_without_empty_optionals() {
        let entry = StoredEntry {
            title: "Курьер".to_string(),
            link: String::new(),
            salary: StoredSalary::from(SalaryRange::default()),
            requirements: String::new(),
            currency: None,
            provider: None,
            saved_at: None,
        };

        let json = serde_json::to_value(&entry).expect("serialize");
        assert!(json.get("currency").is_none());
        assert_eq!(json["salary"]["label"], SALARY_NOT_SPECIFIED);
        assert_eq!(json["title"], "Курьер");
    }
}
