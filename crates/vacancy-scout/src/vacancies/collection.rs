use super::domain::Vacancy;
use super::normalizer::normalize_value;
use crate::storage::{JsonFileStore, StoreError, StoredRecord, VacancyStore};
use crate::upstream::VacancySource;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of persisting a batch of vacancies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveSummary {
    /// Vacancies handed to the store.
    pub submitted: usize,
    /// Vacancies that were not already present in identical form.
    pub appended: usize,
}

/// Requests pages `0..pages` one after another and normalizes every item.
///
/// A page that fails or carries no `items` is skipped. Items that cannot be
/// normalized are dropped. Order is page first, then item.
pub async fn fetch_across_pages<S>(
    source: &S,
    query: &str,
    area: &str,
    pages: u32,
) -> Vec<Vacancy>
where
    S: VacancySource + ?Sized,
{
    let mut vacancies = Vec::new();

    for page in 0..pages {
        let raw_page = match source.fetch_page(query, area, page).await {
            Ok(raw_page) => raw_page,
            Err(err) => {
                warn!(page, error = %err, "skipping vacancy page");
                continue;
            }
        };

        let Some(items) = raw_page.items else {
            warn!(page, "key 'items' not found in response");
            continue;
        };

        let before = vacancies.len();
        for item in &items {
            match normalize_value(item) {
                Some(vacancy) => vacancies.push(vacancy),
                None => debug!(page, "dropping listing without title or url"),
            }
        }
        debug!(
            page,
            received = items.len(),
            kept = vacancies.len() - before,
            "normalized vacancy page"
        );
    }

    info!(query, area, pages, fetched = vacancies.len(), "vacancy fetch finished");
    vacancies
}

/// Adds every vacancy to `store`, one call per vacancy.
pub fn save_all_to(
    store: &dyn VacancyStore,
    vacancies: &[Vacancy],
) -> Result<SaveSummary, StoreError> {
    let mut summary = SaveSummary {
        submitted: vacancies.len(),
        appended: 0,
    };

    for vacancy in vacancies {
        if store.add(StoredRecord::from(vacancy))? {
            summary.appended += 1;
        }
    }

    info!(
        path = %store.location().display(),
        submitted = summary.submitted,
        appended = summary.appended,
        "saved vacancies"
    );
    Ok(summary)
}

/// Saves into the JSON file at `path`.
pub fn save_all(
    vacancies: &[Vacancy],
    path: impl AsRef<Path>,
) -> Result<SaveSummary, StoreError> {
    save_all_to(&JsonFileStore::new(path.as_ref()), vacancies)
}

pub fn load_all_from(store: &dyn VacancyStore) -> Vec<Vacancy> {
    store.list().into_iter().map(Vacancy::from).collect()
}

pub fn load_all(path: impl AsRef<Path>) -> Vec<Vacancy> {
    load_all_from(&JsonFileStore::new(path.as_ref()))
}

/// Returns the `n` best-paid vacancies by lower salary bound.
///
/// The sort is stable, so listings with equal `salary_from` keep their
/// input order.
pub fn rank_top(vacancies: &[Vacancy], n: usize) -> Vec<Vacancy> {
    let mut ranked = vacancies.to_vec();
    ranked.sort_by(|a, b| b.cmp_by_salary_from(a));
    ranked.truncate(n);
    ranked
}

/// Keeps vacancies whose description contains `keyword`, ignoring case.
/// A vacancy without a description never matches.
pub fn filter_by_keyword(vacancies: &[Vacancy], keyword: &str) -> Vec<Vacancy> {
    let needle = keyword.to_lowercase();
    vacancies
        .iter()
        .filter(|vacancy| {
            let description = vacancy.description();
            !description.is_empty() && description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
