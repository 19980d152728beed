use std::io::{self, Write};

use vacancy_hub_core::CanonicalVacancy;

/// Prints the canonical fields of each vacancy followed by a blank line.
pub fn write_vacancies<W: Write>(out: &mut W, vacancies: &[CanonicalVacancy]) -> io::Result<()> {
    for vacancy in vacancies {
        write_vacancy(out, vacancy)?;
    }
    Ok(())
}

pub fn write_vacancy<W: Write>(out: &mut W, vacancy: &CanonicalVacancy) -> io::Result<()> {
    writeln!(out, "Title: {}", vacancy.title)?;
    writeln!(out, "Link: {}", vacancy.link)?;
    match (&vacancy.currency, vacancy.salary().is_unspecified()) {
        (Some(currency), false) => {
            writeln!(out, "Salary: {} {}", vacancy.salary_label(), currency)?
        }
        _ => writeln!(out, "Salary: {}", vacancy.salary_label())?,
    }
    writeln!(out, "Requirements: {}", vacancy.requirements)?;
    if let Some(provider) = vacancy.provider {
        writeln!(out, "Source: {}", provider.display_name())?;
    }
    writeln!(out)
}
