pub mod company;
pub mod job;

pub use company::{Company, CompanyDetail, CompanyField, CompanyUpdate, NewCompany};
pub use job::{Job, JobField, JobSummary, JobUpdate, NewJob};

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Present values only: an explicit `null` is a deserialization error.
pub(crate) fn non_null<'de, T, D>(de: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(de).map(Some)
}
