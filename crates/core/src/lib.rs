pub mod config;
pub mod error;
pub mod field;
pub mod offset;
pub mod presence;

pub use config::ScanConfig;
pub use error::*;
pub use field::CronField;
pub use offset::TimeZoneOffset;
pub use presence::*;
