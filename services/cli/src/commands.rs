use crate::render::render_vacancies;
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use vacancy_scout::config::AppConfig;
use vacancy_scout::error::AppError;
use vacancy_scout::storage::{open_store, StoreFormat, VacancyStore};
use vacancy_scout::upstream::{HeadHunterClient, VacancySource};
use vacancy_scout::vacancies::{
    fetch_across_pages, filter_by_keyword, load_all_from, rank_top, save_all_to, Vacancy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for StoreFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => StoreFormat::Json,
            FormatArg::Csv => StoreFormat::Csv,
        }
    }
}

/// Selects the vacancy file a command works on.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct StoreArgs {
    /// Storage format (inferred from --file when omitted, JSON otherwise)
    #[arg(long, value_enum)]
    pub(crate) format: Option<FormatArg>,
    /// Vacancy file (defaults to the configured path for the format)
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
}

impl StoreArgs {
    pub(crate) fn resolve(&self, config: &AppConfig) -> (StoreFormat, PathBuf) {
        match (self.format.map(StoreFormat::from), &self.file) {
            (Some(format), Some(file)) => (format, file.clone()),
            (None, Some(file)) => (StoreFormat::from_path(file), file.clone()),
            (Some(StoreFormat::Csv), None) => (StoreFormat::Csv, config.storage.csv_path.clone()),
            (Some(StoreFormat::Json) | None, None) => {
                (StoreFormat::Json, config.storage.json_path.clone())
            }
        }
    }

    pub(crate) fn open(&self, config: &AppConfig) -> Box<dyn VacancyStore> {
        let (format, path) = self.resolve(config);
        info!(format = format.label(), path = %path.display(), "opening vacancy store");
        open_store(format, path)
    }
}

/// Narrows a vacancy list before printing.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct ViewArgs {
    /// Show only the N vacancies with the highest lower salary bound
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Show only vacancies whose description contains this keyword
    #[arg(long)]
    pub(crate) keyword: Option<String>,
}

impl ViewArgs {
    pub(crate) fn apply(&self, vacancies: &[Vacancy]) -> Vec<Vacancy> {
        let mut selected = match &self.keyword {
            Some(keyword) => filter_by_keyword(vacancies, keyword),
            None => vacancies.to_vec(),
        };
        if let Some(n) = self.top {
            selected = rank_top(&selected, n);
        }
        selected
    }
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Free-text search query
    #[arg(long)]
    pub(crate) query: String,
    /// Area identifier (defaults to the configured nationwide area)
    #[arg(long)]
    pub(crate) area: Option<String>,
    /// Number of result pages to request
    #[arg(long, default_value_t = 1)]
    pub(crate) pages: u32,
    #[command(flatten)]
    pub(crate) store: StoreArgs,
    #[command(flatten)]
    pub(crate) view: ViewArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub(crate) store: StoreArgs,
    #[command(flatten)]
    pub(crate) view: ViewArgs,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteArgs {
    /// URL of the listing to remove
    pub(crate) url: String,
    #[command(flatten)]
    pub(crate) store: StoreArgs,
}

pub(crate) async fn run_search<W: Write>(
    source: &dyn VacancySource,
    config: &AppConfig,
    args: SearchArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let area = args
        .area
        .filter(|area| !area.trim().is_empty())
        .unwrap_or_else(|| config.api.default_area.clone());

    let vacancies = fetch_across_pages(source, &args.query, &area, args.pages).await;
    if vacancies.is_empty() {
        writeln!(out, "No vacancies match the query.")?;
        return Ok(());
    }

    let store = args.store.open(config);
    let summary = save_all_to(store.as_ref(), &vacancies)?;
    writeln!(
        out,
        "Saved {} vacancies to {} ({} new)",
        summary.submitted,
        store.location().display(),
        summary.appended
    )?;

    render_vacancies(out, &args.view.apply(&vacancies))?;
    Ok(())
}

pub(crate) fn run_list<W: Write>(
    config: &AppConfig,
    args: ListArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let store = args.store.open(config);
    let vacancies = load_all_from(store.as_ref());
    writeln!(
        out,
        "Loaded {} vacancies from {}",
        vacancies.len(),
        store.location().display()
    )?;
    render_vacancies(out, &args.view.apply(&vacancies))?;
    Ok(())
}

pub(crate) fn run_delete<W: Write>(
    config: &AppConfig,
    args: DeleteArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let store = args.store.open(config);
    let before = store.list().len();
    store.delete(&args.url)?;
    let removed = before - store.list().len();
    writeln!(
        out,
        "Removed {removed} vacancies with URL {} from {}",
        args.url,
        store.location().display()
    )?;
    Ok(())
}

pub(crate) fn run_clear<W: Write>(
    config: &AppConfig,
    args: StoreArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let store = args.open(config);
    store.clear()?;
    writeln!(out, "Cleared {}", store.location().display())?;
    Ok(())
}

pub(crate) async fn run_ping<W: Write>(
    client: &HeadHunterClient,
    out: &mut W,
) -> Result<(), AppError> {
    client.check_connection().await?;
    writeln!(out, "Upstream API is reachable.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use vacancy_scout::config::{ApiConfig, AppEnvironment, StorageConfig, TelemetryConfig};
    use vacancy_scout::storage::StoredRecord;

    fn config(dir: &Path) -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            api: ApiConfig {
                base_url: "https://api.hh.ru".to_string(),
                per_page: 100,
                timeout_secs: 5,
                default_area: "113".to_string(),
            },
            storage: StorageConfig {
                json_path: dir.join("vacancies.json"),
                csv_path: dir.join("vacancies.csv"),
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
        }
    }

    #[test]
    fn store_resolution_prefers_explicit_settings() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config(dir.path());

        let default = StoreArgs::default().resolve(&config);
        assert_eq!(default, (StoreFormat::Json, config.storage.json_path.clone()));

        let csv = StoreArgs {
            format: Some(FormatArg::Csv),
            file: None,
        };
        assert_eq!(
            csv.resolve(&config),
            (StoreFormat::Csv, config.storage.csv_path.clone())
        );

        let inferred = StoreArgs {
            format: None,
            file: Some(PathBuf::from("export/listings.csv")),
        };
        assert_eq!(inferred.resolve(&config).0, StoreFormat::Csv);

        let forced = StoreArgs {
            format: Some(FormatArg::Json),
            file: Some(PathBuf::from("export/listings.csv")),
        };
        assert_eq!(forced.resolve(&config).0, StoreFormat::Json);
    }

    #[test]
    fn view_filters_before_ranking() {
        let vacancies = vec![
            Vacancy::new("A", "u1")
                .with_salary(300_000u64, 0u64)
                .with_description("Java"),
            Vacancy::new("B", "u2")
                .with_salary(100_000u64, 0u64)
                .with_description("Rust"),
            Vacancy::new("C", "u3")
                .with_salary(200_000u64, 0u64)
                .with_description("rust and go"),
        ];
        let view = ViewArgs {
            top: Some(1),
            keyword: Some("RUST".to_string()),
        };

        let selected = view.apply(&vacancies);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title(), "C");
    }

    #[test]
    fn delete_and_clear_report_changes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config(dir.path());
        let store = StoreArgs::default().open(&config);
        store.add(StoredRecord::new("A", "u1")).expect("add");
        store.add(StoredRecord::new("B", "u2")).expect("add");

        let mut out = Vec::new();
        run_delete(
            &config,
            DeleteArgs {
                url: "u1".to_string(),
                store: StoreArgs::default(),
            },
            &mut out,
        )
        .expect("delete runs");
        assert_eq!(store.list(), vec![StoredRecord::new("B", "u2")]);

        run_list(
            &config,
            ListArgs {
                store: StoreArgs::default(),
                view: ViewArgs::default(),
            },
            &mut out,
        )
        .expect("list runs");

        run_clear(&config, StoreArgs::default(), &mut out).expect("clear runs");
        assert!(store.list().is_empty());

        let output = String::from_utf8(out).expect("utf-8 output");
        assert!(output.contains("Removed 1 vacancies with URL u1"));
        assert!(output.contains("Loaded 1 vacancies from"));
        assert!(output.contains("Title: B"));
        assert!(output.contains("Cleared"));
    }
}
