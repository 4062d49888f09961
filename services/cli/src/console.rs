use crate::render::render_vacancies;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::warn;
use vacancy_scout::error::AppError;
use vacancy_scout::upstream::VacancySource;
use vacancy_scout::vacancies::{fetch_across_pages, filter_by_keyword, rank_top, save_all};

/// Inputs of an interactive session that do not come from the prompt.
#[derive(Debug, Clone)]
pub(crate) struct SessionSettings {
    pub(crate) default_area: String,
    pub(crate) save_path: PathBuf,
}

/// Runs one search-save-rank-filter round driven by prompts on `input`.
///
/// A non-numeric answer aborts only the step that asked for it.
pub(crate) async fn run_session<R, W>(
    source: &dyn VacancySource,
    settings: &SessionSettings,
    input: &mut R,
    out: &mut W,
) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
{
    let query = prompt(input, out, "Enter a search query: ")?;
    let area = prompt(
        input,
        out,
        "Enter an area ID (leave blank to search nationwide): ",
    )?;
    let area = if area.is_empty() {
        settings.default_area.clone()
    } else {
        area
    };

    let raw_pages = prompt(input, out, "How many pages should be searched? ")?;
    let Ok(pages) = raw_pages.parse::<u32>() else {
        warn!(input = %raw_pages, "rejected page count");
        writeln!(out, "Invalid page count '{raw_pages}': expected a whole number.")?;
        return Ok(());
    };

    let vacancies = fetch_across_pages(source, &query, &area, pages).await;
    if vacancies.is_empty() {
        writeln!(out, "No vacancies match the query.")?;
        return Ok(());
    }

    match save_all(&vacancies, &settings.save_path) {
        Ok(summary) => writeln!(
            out,
            "Saved {} vacancies to {} ({} new)",
            summary.submitted,
            settings.save_path.display(),
            summary.appended
        )?,
        Err(err) => {
            warn!(error = %err, "vacancies were not saved");
            writeln!(
                out,
                "Could not save vacancies to {}: {err}",
                settings.save_path.display()
            )?;
        }
    }

    let raw_top = prompt(
        input,
        out,
        "How many top vacancies by salary should be shown? ",
    )?;
    match raw_top.parse::<usize>() {
        Ok(n) => {
            writeln!(out, "\nTop vacancies by salary:")?;
            render_vacancies(out, &rank_top(&vacancies, n))?;
        }
        Err(_) => {
            writeln!(out, "Invalid number of vacancies '{raw_top}'.")?;
        }
    }

    let keyword = prompt(input, out, "Enter a keyword to search in descriptions: ")?;
    writeln!(out, "\nVacancies with keyword '{keyword}':")?;
    render_vacancies(out, &filter_by_keyword(&vacancies, &keyword))?;

    Ok(())
}

fn prompt<R, W>(input: &mut R, out: &mut W, message: &str) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::io::Cursor;
    use std::sync::Mutex;
    use vacancy_scout::upstream::{RawPage, SourceError};
    use vacancy_scout::vacancies::load_all;

    #[derive(Default)]
    struct FixedSource {
        areas: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl VacancySource for FixedSource {
        async fn fetch_page(
            &self,
            _query: &str,
            area: &str,
            page: u32,
        ) -> Result<RawPage, SourceError> {
            self.areas.lock().expect("area log poisoned").push(area.to_string());
            if page > 0 {
                return Err(SourceError::Unavailable("only one page".to_string()));
            }
            Ok(RawPage::with_items(vec![
                json!({
                    "name": "Junior Python Developer",
                    "alternate_url": "https://hh.ru/vacancy/1",
                    "salary": { "from": 60000, "to": null },
                    "snippet": { "requirement": "Python basics" },
                }),
                json!({
                    "name": "Senior Rust Developer",
                    "alternate_url": "https://hh.ru/vacancy/2",
                    "salary": { "from": 250000, "to": 350000 },
                    "snippet": { "requirement": null, "responsibility": "Own the Rust services" },
                }),
            ]))
        }
    }

    async fn run_with(input: &str, source: &FixedSource) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = SessionSettings {
            default_area: "113".to_string(),
            save_path: dir.path().join("vacancies.json"),
        };
        let mut output = Vec::new();
        run_session(source, &settings, &mut Cursor::new(input), &mut output)
            .await
            .expect("session completes");
        (String::from_utf8(output).expect("utf-8 output"), dir)
    }

    #[tokio::test]
    async fn full_session_saves_ranks_and_filters() {
        let source = FixedSource::default();
        let (output, dir) = run_with("developer\n\n2\n1\nrust\n", &source).await;

        assert_eq!(
            *source.areas.lock().expect("area log poisoned"),
            ["113", "113"]
        );
        assert!(output.contains("Saved 2 vacancies to"));
        assert!(output.contains("(2 new)"));

        let top_section = output
            .split("Top vacancies by salary:")
            .nth(1)
            .expect("top section printed");
        let top_block = top_section
            .split("Vacancies with keyword")
            .next()
            .expect("top block");
        assert!(top_block.contains("Senior Rust Developer"));
        assert!(!top_block.contains("Junior Python Developer"));

        let keyword_block = output
            .split("Vacancies with keyword 'rust':")
            .nth(1)
            .expect("keyword section printed");
        assert!(keyword_block.contains("Own the Rust services"));
        assert!(!keyword_block.contains("Python basics"));

        assert_eq!(load_all(dir.path().join("vacancies.json")).len(), 2);
    }

    #[tokio::test]
    async fn invalid_page_count_stops_before_fetching() {
        let source = FixedSource::default();
        let (output, dir) = run_with("developer\n1\nmany\n", &source).await;

        assert!(output.contains("Invalid page count 'many'"));
        assert!(source.areas.lock().expect("area log poisoned").is_empty());
        assert!(!dir.path().join("vacancies.json").exists());
    }

    #[tokio::test]
    async fn invalid_top_count_still_runs_keyword_step() {
        let source = FixedSource::default();
        let (output, _dir) = run_with("developer\n2\n1\nten\npython\n", &source).await;

        assert_eq!(
            *source.areas.lock().expect("area log poisoned"),
            ["2"]
        );
        assert!(output.contains("Invalid number of vacancies 'ten'."));
        assert!(output.contains("Vacancies with keyword 'python':"));
        assert!(output.contains("Junior Python Developer"));
    }

    #[tokio::test]
    async fn save_failure_still_ranks_and_filters() {
        let source = FixedSource::default();
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = SessionSettings {
            default_area: "113".to_string(),
            save_path: dir.path().to_path_buf(),
        };
        let mut output = Vec::new();

        run_session(
            &source,
            &settings,
            &mut Cursor::new("developer\n\n1\n1\nrust\n"),
            &mut output,
        )
        .await
        .expect("session completes despite the write error");

        let output = String::from_utf8(output).expect("utf-8 output");
        assert!(output.contains("Could not save vacancies to"));
        assert!(output.contains("Top vacancies by salary:"));
        assert!(output.contains("Vacancies with keyword 'rust':"));
        assert!(output.contains("Own the Rust services"));
    }

    #[tokio::test]
    async fn empty_fetch_reports_no_matches() {
        let source = FixedSource::default();
        let (output, dir) = run_with("developer\n\n0\n", &source).await;

        assert!(output.contains("No vacancies match the query."));
        assert!(!dir.path().join("vacancies.json").exists());
    }
}
