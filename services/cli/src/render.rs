use std::io::{self, Write};
use vacancy_scout::vacancies::Vacancy;

const SEPARATOR: &str = "--------------------";

pub(crate) fn render_vacancies<W: Write>(out: &mut W, vacancies: &[Vacancy]) -> io::Result<()> {
    if vacancies.is_empty() {
        return writeln!(out, "No vacancies to display.");
    }

    for vacancy in vacancies {
        writeln!(out, "Title: {}", vacancy.title())?;
        writeln!(out, "URL: {}", vacancy.url())?;
        writeln!(
            out,
            "Salary: {} - {}",
            vacancy.salary_from(),
            vacancy.salary_to()
        )?;
        writeln!(out, "Description: {}", vacancy.description())?;
        writeln!(out, "{SEPARATOR}")?;
    }

    Ok(())
}
