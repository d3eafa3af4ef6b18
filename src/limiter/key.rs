use chrono::NaiveDate;
use std::net::IpAddr;

pub const UNKNOWN_CLIENT: &str = "unknown";

/// Quota bucket: one client on one UTC calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClientUsageKey {
    pub client: String,
    pub day: NaiveDate,
}

impl ClientUsageKey {
    pub fn new(client: &str, day: NaiveDate) -> Self {
        Self {
            client: client.to_string(),
            day,
        }
    }
}

/// Identifies the caller: first `X-Forwarded-For` entry, else the peer address.
pub fn client_id(forwarded_for: Option<&str>, peer: Option<IpAddr>) -> String {
    let forwarded = forwarded_for
        .and_then(|raw| raw.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty());
    match (forwarded, peer) {
        (Some(first), _) => first.to_string(),
        (None, Some(ip)) => ip.to_string(),
        (None, None) => UNKNOWN_CLIENT.to_string(),
    }
}
