pub mod company;
pub mod error;
pub mod filter_where;
pub mod job;

pub use company::CompanyFilter;
pub use error::FilterError;
pub use filter_where::{FilterWhere, WhereClause};
pub use job::JobFilter;
