pub mod collection;
pub mod domain;
pub mod normalizer;
pub mod parser;

pub use collection::{
    fetch_across_pages, filter_by_keyword, load_all, load_all_from, rank_top, save_all,
    save_all_to, SaveSummary,
};
pub use domain::{Salary, Vacancy};
pub use normalizer::{normalize, normalize_value};
pub use parser::RawVacancy;
