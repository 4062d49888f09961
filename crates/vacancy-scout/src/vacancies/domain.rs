use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Salary amount coerced to a non-negative integer.
///
/// Deserialization never fails: integers pass through, non-negative floats
/// are truncated, numeric strings are parsed and anything else resolves to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Salary(u64);

impl Salary {
    pub const ZERO: Self = Self(0);

    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            Self(value.trunc() as u64)
        } else {
            Self::ZERO
        }
    }

    pub fn from_i64(value: i64) -> Self {
        u64::try_from(value).map(Self).unwrap_or(Self::ZERO)
    }

    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<u64>() {
            return Self(value);
        }
        trimmed
            .parse::<f64>()
            .map(Self::from_f64)
            .unwrap_or(Self::ZERO)
    }

    /// Applies the coercion rules to an already decoded JSON value.
    pub fn coerce(value: &serde_json::Value) -> Self {
        Self::deserialize(value).unwrap_or(Self::ZERO)
    }
}

impl From<u64> for Salary {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Salary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SalaryVisitor)
    }
}

struct SalaryVisitor;

impl<'de> Visitor<'de> for SalaryVisitor {
    type Value = Salary;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a salary amount")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Salary, E> {
        Ok(Salary(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Salary, E> {
        Ok(Salary::from_i64(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Salary, E> {
        Ok(Salary::from_f64(value))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Salary, E> {
        Ok(Salary::ZERO)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Salary, E> {
        Ok(Salary::parse(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Salary, E> {
        Ok(Salary::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Salary, E> {
        Ok(Salary::ZERO)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Salary, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SalaryVisitor)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Salary, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Salary::ZERO)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Salary, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Salary::ZERO)
    }
}

/// A normalized job listing.
///
/// Equality compares every field. Ranking by salary goes through
/// [`Vacancy::cmp_by_salary_from`] instead of `Ord`, so two listings that
/// merely share a salary are never treated as the same listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vacancy {
    title: String,
    url: String,
    salary_from: Salary,
    salary_to: Salary,
    description: String,
}

impl Vacancy {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            salary_from: Salary::ZERO,
            salary_to: Salary::ZERO,
            description: String::new(),
        }
    }

    pub fn with_salary(mut self, from: impl Into<Salary>, to: impl Into<Salary>) -> Self {
        self.salary_from = from.into();
        self.salary_to = to.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn salary_from(&self) -> u64 {
        self.salary_from.get()
    }

    pub fn salary_to(&self) -> u64 {
        self.salary_to.get()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Orders two listings by their lower salary bound only.
    pub fn cmp_by_salary_from(&self, other: &Self) -> Ordering {
        self.salary_from.cmp(&other.salary_from)
    }

    pub(crate) fn into_parts(self) -> (String, String, Salary, Salary, String) {
        (
            self.title,
            self.url,
            self.salary_from,
            self.salary_to,
            self.description,
        )
    }
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}-{} - {}",
            self.title, self.salary_from, self.salary_to, self.url
        )
    }
}
