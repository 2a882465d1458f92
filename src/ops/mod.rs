pub mod assemble;
pub mod results;
pub mod scan;

pub use scan::{ScanError, check_access, run_scan, run_scan_now};
