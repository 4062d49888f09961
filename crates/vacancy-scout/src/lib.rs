pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;
pub mod upstream;
pub mod vacancies;
