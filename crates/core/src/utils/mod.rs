pub mod csv_io;
pub mod parse;
pub mod time_utils;

pub use parse::parse_optional_number;
pub use time_utils::{today_utc, MonthKey};
