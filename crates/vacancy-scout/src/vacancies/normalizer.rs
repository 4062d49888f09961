use super::domain::{Salary, Vacancy};
use super::parser::{RawSalary, RawSnippet, RawVacancy};
use serde_json::Value;

/// Converts one upstream listing into a [`Vacancy`].
///
/// Returns `None` when the title or the listing URL is missing. Salary and
/// description fall back to zero and empty text.
pub fn normalize(raw: &RawVacancy) -> Option<Vacancy> {
    let title = raw.name.as_deref()?;
    let url = raw.alternate_url.as_deref()?;

    let (salary_from, salary_to) = salary_bounds(raw.salary.as_ref());
    let description = description(raw.snippet.as_ref());

    Some(
        Vacancy::new(title, url)
            .with_salary(salary_from, salary_to)
            .with_description(description),
    )
}

pub fn normalize_value(value: &Value) -> Option<Vacancy> {
    RawVacancy::from_value(value).as_ref().and_then(normalize)
}

fn salary_bounds(salary: Option<&RawSalary>) -> (Salary, Salary) {
    match salary {
        Some(salary) => (
            salary.from.unwrap_or_default(),
            salary.to.unwrap_or_default(),
        ),
        None => (Salary::ZERO, Salary::ZERO),
    }
}

fn description(snippet: Option<&RawSnippet>) -> String {
    let Some(snippet) = snippet else {
        return String::new();
    };

    [&snippet.requirement, &snippet.responsibility]
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty())
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_listing_maps_every_field() {
        let vacancy = normalize_value(&json!({
            "name": "Python Developer",
            "alternate_url": "https://x/123",
            "salary": { "from": 100000, "to": 150000 },
            "snippet": { "requirement": "Py" },
        }))
        .expect("listing normalizes");

        assert_eq!(
            vacancy,
            Vacancy::new("Python Developer", "https://x/123")
                .with_salary(100_000u64, 150_000u64)
                .with_description("Py")
        );
    }

    #[test]
    fn missing_or_null_salary_resolves_to_zero() {
        for item in [
            json!({ "name": "A", "alternate_url": "u" }),
            json!({ "name": "A", "alternate_url": "u", "salary": null }),
            json!({ "name": "A", "alternate_url": "u", "salary": { "from": null, "to": null } }),
            json!({ "name": "A", "alternate_url": "u", "salary": "hidden" }),
        ] {
            let vacancy = normalize_value(&item).expect("listing normalizes");
            assert_eq!(vacancy.salary_from(), 0);
            assert_eq!(vacancy.salary_to(), 0);
        }
    }

    #[test]
    fn salary_bounds_are_resolved_independently() {
        let only_to = normalize_value(&json!({
            "name": "A",
            "alternate_url": "u",
            "salary": { "to": 150000, "currency": "RUR" },
        }))
        .expect("listing normalizes");
        assert_eq!(only_to.salary_from(), 0);
        assert_eq!(only_to.salary_to(), 150_000);

        let only_from = normalize_value(&json!({
            "name": "A",
            "alternate_url": "u",
            "salary": { "from": 80000, "to": "negotiable" },
        }))
        .expect("listing normalizes");
        assert_eq!(only_from.salary_from(), 80_000);
        assert_eq!(only_from.salary_to(), 0);
    }

    #[test]
    fn description_prefers_requirement_then_responsibility() {
        let requirement = normalize_value(&json!({
            "name": "A",
            "alternate_url": "u",
            "snippet": { "requirement": "Rust", "responsibility": "Ship" },
        }))
        .expect("listing normalizes");
        assert_eq!(requirement.description(), "Rust");

        let responsibility = normalize_value(&json!({
            "name": "A",
            "alternate_url": "u",
            "snippet": { "requirement": null, "responsibility": "Ship" },
        }))
        .expect("listing normalizes");
        assert_eq!(responsibility.description(), "Ship");

        let empty_requirement = normalize_value(&json!({
            "name": "A",
            "alternate_url": "u",
            "snippet": { "requirement": "", "responsibility": "Ship" },
        }))
        .expect("listing normalizes");
        assert_eq!(empty_requirement.description(), "Ship");

        let missing = normalize_value(&json!({ "name": "A", "alternate_url": "u" }))
            .expect("listing normalizes");
        assert_eq!(missing.description(), "");
    }

    #[test]
    fn missing_title_or_url_drops_the_listing() {
        assert!(normalize_value(&json!({ "alternate_url": "u" })).is_none());
        assert!(normalize_value(&json!({ "name": "A" })).is_none());
        assert!(normalize_value(&json!({ "name": null, "alternate_url": "u" })).is_none());
        assert!(normalize_value(&json!([])).is_none());
    }
}
