pub mod counter;
pub mod key;

pub use counter::{Admission, DailyLimiter, DAILY_LIMIT, RESET_HINT};
pub use key::{client_id, ClientUsageKey, UNKNOWN_CLIENT};
