use std::cmp::Ordering;

use crate::types::CanonicalVacancy;

/// Sorts vacancies by salary metric, highest first.
///
/// The sort is stable: vacancies with equal metrics keep their input order.
pub fn sort_vacancies(mut vacancies: Vec<CanonicalVacancy>) -> Vec<CanonicalVacancy> {
    vacancies.sort_by(|left, right| compare_by_salary(right, left));
    vacancies
}

/// Returns at most `n` leading vacancies. Non-positive `n` yields nothing.
pub fn top_vacancies(mut vacancies: Vec<CanonicalVacancy>, n: i64) -> Vec<CanonicalVacancy> {
    let Ok(limit) = usize::try_from(n) else {
        return Vec::new();
    };
    vacancies.truncate(limit);
    vacancies
}

pub fn rank_and_truncate(vacancies: Vec<CanonicalVacancy>, n: i64) -> Vec<CanonicalVacancy> {
    top_vacancies(sort_vacancies(vacancies), n)
}

fn compare_by_salary(left: &CanonicalVacancy, right: &CanonicalVacancy) -> Ordering {
    left.salary_metric().total_cmp(&right.salary_metric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::Normalizer;
    use serde_json::json;

    fn vacancy(title: &str, from: Option<i64>, to: Option<i64>) -> CanonicalVacancy {
        Normalizer::normalize(
            None,
            &json!({ "name": title, "salary": { "from": from, "to": to } }),
        )
    }

    fn titles(vacancies: &[CanonicalVacancy]) -> Vec<&str> {
        vacancies.iter().map(|v| v.title.as_str()).collect()
    }

    #[test]
    fn top_two_are_highest_metrics_in_order() {
        let vacancies = vec![
            vacancy("none", None, None),
            vacancy("high", Some(100000), Some(150000)),
            vacancy("mid", Some(50000), None),
        ];

        let top = rank_and_truncate(vacancies, 2);
        assert_eq!(titles(&top), ["high", "mid"]);
        assert_eq!(top[0].salary_metric(), 125000.0);
        assert_eq!(top[1].salary_metric(), 50000.0);
    }

    #[test]
    fn equal_metrics_keep_input_order() {
        let vacancies = vec![
            vacancy("first", Some(1000), None),
            vacancy("second", None, Some(1000)),
            vacancy("third", Some(500), Some(1500)),
        ];

        let sorted = sort_vacancies(vacancies);
        assert_eq!(titles(&sorted), ["first", "second", "third"]);
    }

    #[test]
    fn non_positive_count_yields_nothing() {
        let vacancies = vec![vacancy("a", Some(1), None)];

        assert!(top_vacancies(vacancies.clone(), 0).is_empty());
        assert!(top_vacancies(vacancies, -3).is_empty());
    }

    #[test]
    fn count_larger_than_list_returns_everything() {
        let vacancies = vec![vacancy("a", Some(1), None), vacancy("b", None, None)];

        assert_eq!(top_vacancies(vacancies, 10).len(), 2);
    }
}
