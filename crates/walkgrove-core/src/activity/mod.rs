mod source;
mod stored;

pub use source::{ActivitySource, DailyMetrics, PedometerReading, PedometerSource};
pub use stored::StoredActivitySource;
