pub mod row;
pub mod table;
pub mod sort;
pub mod search;
pub mod filter;
pub mod query;

pub use row::Row;
pub use table::Table;
pub use sort::{SortDirection, SortState};
pub use search::SearchFilter;
pub use filter::CategoryFilter;
pub use query::TableQuery;
