use crate::types::CanonicalVacancy;

/// Case-insensitive keyword matcher over a vacancy's full raw text.
///
/// A filter without keywords lets every vacancy through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Builds a filter from keywords; blank entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self { keywords }
    }

    /// Parses a comma separated list such as `"python, rust"`.
    pub fn parse(input: &str) -> Self {
        Self::new(input.split(','))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Returns `true` when any keyword occurs in the vacancy's raw text.
    pub fn matches(&self, vacancy: &CanonicalVacancy) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let haystack = vacancy.raw_text().to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| haystack.contains(keyword.as_str()))
    }

    pub fn apply(&self, vacancies: Vec<CanonicalVacancy>) -> Vec<CanonicalVacancy> {
        vacancies
            .into_iter()
            .filter(|vacancy| self.matches(vacancy))
            .collect()
    }
}

/// Keeps the vacancies matching at least one keyword.
pub fn filter_vacancies<S: AsRef<str>>(
    vacancies: Vec<CanonicalVacancy>,
    keywords: &[S],
) -> Vec<CanonicalVacancy> {
    KeywordFilter::new(keywords).apply(vacancies)
}

/// Filters several provider result lists and concatenates the survivors in order.
pub fn filter_sources<S: AsRef<str>>(
    sources: Vec<Vec<CanonicalVacancy>>,
    keywords: &[S],
) -> Vec<CanonicalVacancy> {
    let filter = KeywordFilter::new(keywords);
    sources
        .into_iter()
        .flat_map(|vacancies| filter.apply(vacancies))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::Normalizer;
    use serde_json::json;

    fn vacancy(raw: serde_json::Value) -> CanonicalVacancy {
        Normalizer::normalize(None, &raw)
    }

    #[test]
    fn keyword_matches_case_insensitively() {
        let python = vacancy(json!({ "name": "Python Developer" }));
        let cook = vacancy(json!({ "name": "Cook", "work": "Kitchen duties" }));

        let kept = filter_vacancies(vec![python.clone(), cook], &["python"]);
        assert_eq!(kept, vec![python]);
    }

    #[test]
    fn keyword_searches_every_raw_field() {
        let hidden = vacancy(json!({
            "name": "Engineer",
            "employer": { "name": "Rust Foundry" }
        }));

        let kept = filter_vacancies(vec![hidden], &["RUST"]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn non_ascii_keywords_match() {
        let record = vacancy(json!({ "profession": "Специалист по согласованиям" }));

        assert!(KeywordFilter::parse("специалист").matches(&record));
    }

    #[test]
    fn empty_keywords_pass_everything() {
        let records = vec![
            vacancy(json!({ "name": "A" })),
            vacancy(json!({ "name": "B" })),
        ];

        let none: [&str; 0] = [];
        assert_eq!(filter_vacancies(records.clone(), &none).len(), 2);
        assert_eq!(KeywordFilter::parse(" , ,").apply(records).len(), 2);
    }

    #[test]
    fn parse_trims_and_drops_blanks() {
        let filter = KeywordFilter::parse(" Python, ,rust ,");
        assert_eq!(filter.keywords(), ["python", "rust"]);
    }

    #[test]
    fn sources_are_concatenated_in_order() {
        let first = vec![
            vacancy(json!({ "name": "Rust dev" })),
            vacancy(json!({ "name": "Cook" })),
        ];
        let second = vec![vacancy(json!({ "profession": "rust mentor" }))];

        let kept = filter_sources(vec![first, second], &["rust"]);
        let titles: Vec<_> = kept.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["Rust dev", "rust mentor"]);
    }
}
