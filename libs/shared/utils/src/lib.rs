pub mod coerce;
pub mod password;
pub mod test_utils;
