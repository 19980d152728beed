use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::types::{CanonicalVacancy, StoredEntry, StoredSalary};

/// Pure helpers converting between live vacancies and their stored projection.
pub struct Projection;

impl Projection {
    /// Builds the persisted projection of a vacancy.
    pub fn stored_entry(vacancy: &CanonicalVacancy, saved_at: DateTime<Utc>) -> StoredEntry {
        StoredEntry {
            title: vacancy.title.clone(),
            link: vacancy.link.clone(),
            salary: StoredSalary::from(vacancy.salary()),
            requirements: vacancy.requirements.clone(),
            currency: vacancy.currency.clone(),
            provider: vacancy.provider,
            saved_at: Some(saved_at),
        }
    }

    /// Rebuilds a vacancy from a stored entry using the structured salary bounds.
    ///
    /// `raw` mirrors the stored fields so keyword filters keep working on
    /// reloaded vacancies.
    pub fn vacancy(entry: &StoredEntry) -> CanonicalVacancy {
        let salary = entry.salary.range();
        CanonicalVacancy {
            id: None,
            provider: entry.provider,
            title: entry.title.clone(),
            link: entry.link.clone(),
            salary_from: salary.from,
            salary_to: salary.to,
            currency: entry.currency.clone(),
            requirements: entry.requirements.clone(),
            raw: raw_view(entry),
        }
    }
}

fn raw_view(entry: &StoredEntry) -> Value {
    json!({
        "title": entry.title,
        "link": entry.link,
        "salary": {
            "from": entry.salary.from,
            "to": entry.salary.to,
            "label": entry.salary.label,
        },
        "requirements": entry.requirements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::Normalizer;
    use crate::types::ProviderKind;

    fn sample() -> CanonicalVacancy {
        Normalizer::normalize(
            Some(ProviderKind::HeadHunter),
            &json!({
                "id": "7",
                "name": "Python Developer",
                "alternate_url": "https://hh.ru/vacancy/7",
                "salary": { "from": 100000, "to": 150000, "currency": "RUR" },
                "snippet": { "requirement": "Python" }
            }),
        )
    }

    #[test]
    fn stored_entry_keeps_structured_salary() {
        let saved_at = Utc::now();
        let entry = Projection::stored_entry(&sample(), saved_at);

        assert_eq!(entry.title, "Python Developer");
        assert_eq!(entry.salary.from, Some(100000));
        assert_eq!(entry.salary.to, Some(150000));
        assert_eq!(entry.salary.label, "from 100000 to 150000");
        assert_eq!(entry.salary.average, 125000.0);
        assert_eq!(entry.saved_at, Some(saved_at));
    }

    #[test]
    fn reconstructed_vacancy_has_same_metric() {
        let original = sample();
        let entry = Projection::stored_entry(&original, Utc::now());
        let restored = Projection::vacancy(&entry);

        assert_eq!(restored.title, original.title);
        assert_eq!(restored.link, original.link);
        assert_eq!(restored.salary_metric(), original.salary_metric());
        assert_eq!(restored.salary_label(), original.salary_label());
        assert_eq!(restored.provider, Some(ProviderKind::HeadHunter));
    }
}
