use crate::limiter::key::ClientUsageKey;
use chrono::{NaiveDate, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;

pub const DAILY_LIMIT: u32 = 50;
pub const RESET_HINT: &str = "resets at next UTC midnight";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Admitted { used: u32, remaining: u32 },
    Rejected { limit: u32 },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

#[derive(Default, Debug)]
struct UsageCounter {
    counts: HashMap<ClientUsageKey, u32>,
    current_day: Option<NaiveDate>,
}

impl UsageCounter {
    fn admit(&mut self, key: ClientUsageKey, limit: u32) -> Admission {
        self.roll_over(key.day);
        let count = self.counts.entry(key).or_default();
        if *count >= limit {
            return Admission::Rejected { limit };
        }
        *count += 1;
        Admission::Admitted {
            used: *count,
            remaining: limit - *count,
        }
    }

    /// Advances the newest seen day and drops every bucket older than it.
    ///
    /// A `day` earlier than the newest one leaves the map alone; its bucket
    /// is counted normally and swept at the next rollover.
    fn roll_over(&mut self, day: NaiveDate) {
        if self.current_day.is_some_and(|current| current >= day) {
            return;
        }
        self.counts.retain(|key, _| key.day >= day);
        self.current_day = Some(day);
    }
}

/// Per-client daily request quota held in process memory.
///
/// The check and the increment happen inside one critical section, so two
/// concurrent requests from the same client can never both take the last slot.
#[derive(Debug)]
pub struct DailyLimiter {
    limit: u32,
    counter: Mutex<UsageCounter>,
}

impl Default for DailyLimiter {
    fn default() -> Self {
        Self::new(DAILY_LIMIT)
    }
}

impl DailyLimiter {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            counter: Mutex::new(UsageCounter::default()),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Admits and counts one request for `client` in the current UTC day.
    pub fn check(&self, client: &str) -> Admission {
        self.check_on(client, Utc::now().date_naive())
    }

    pub fn check_on(&self, client: &str, day: NaiveDate) -> Admission {
        let mut counter = self.counter.lock();
        counter.admit(ClientUsageKey::new(client, day), self.limit)
    }

    pub fn usage(&self, client: &str, day: NaiveDate) -> u32 {
        let counter = self.counter.lock();
        counter
            .counts
            .get(&ClientUsageKey::new(client, day))
            .copied()
            .unwrap_or(0)
    }

    pub fn tracked_keys(&self) -> usize {
        self.counter.lock().counts.len()
    }
}
