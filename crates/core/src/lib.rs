//! Domain layer: canonical vacancy records and the pure pipeline stages
//! (normalization, keyword filtering, salary ranking, stored projection).

pub mod filter;
pub mod normalizer;
pub mod projection;
pub mod ranking;
pub mod types;

pub use filter::{filter_sources, filter_vacancies, KeywordFilter};
pub use normalizer::Normalizer;
pub use projection::Projection;
pub use ranking::{rank_and_truncate, sort_vacancies, top_vacancies};
pub use types::{
    CanonicalVacancy, ProviderKind, SalaryRange, StoredEntry, StoredSalary, SALARY_NOT_SPECIFIED,
};
