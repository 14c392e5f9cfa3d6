pub mod storage;
pub mod table;
pub mod types;

pub use storage::{discover_data_file, list_data_files, load_specials, DATA_FILE_CANDIDATES};
pub use table::{PivotRow, SpecialsTable, SummaryStats};
pub use types::{Day, ParseDayError, Special};
