pub mod file_utils;
pub mod json_utils;
pub mod time_utils;
