// Report module - tabular shaping and Excel output

pub mod excel;
pub mod operations;
pub mod portfolio;
pub mod table;

pub use excel::write_report;
pub use operations::fetch_operations;
pub use portfolio::fetch_portfolio;
pub use table::{Cell, Table};
