pub mod profile;
pub mod schedule;

pub use profile::ProfileService;
pub use schedule::ScheduleService;
