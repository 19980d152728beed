use std::io::{BufRead, Write};

use vacancy_hub_storage::VacancyStore;

use crate::{console::Console, report, CliError};

/// Prints saved vacancies with an average salary of at least `min_salary`.
pub fn list_saved<R: BufRead, W: Write>(
    store: &VacancyStore,
    min_salary: f64,
    console: &mut Console<R, W>,
) -> Result<usize, CliError> {
    let vacancies = store.by_min_salary(min_salary);
    if vacancies.is_empty() {
        console.say("No saved vacancies match.")?;
        return Ok(0);
    }

    report::write_vacancies(console.output(), &vacancies)?;
    Ok(vacancies.len())
}

pub fn delete_saved<R: BufRead, W: Write>(
    store: &mut VacancyStore,
    title: &str,
    console: &mut Console<R, W>,
) -> Result<usize, CliError> {
    let removed = store.delete(title)?;
    if removed == 0 {
        console.say(&format!("No saved vacancy titled '{title}'."))?;
    } else {
        console.say(&format!("Removed '{title}'."))?;
    }
    Ok(removed)
}
