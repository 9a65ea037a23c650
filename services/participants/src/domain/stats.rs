//! Dashboard aggregates. The store returns raw group-by counts; the shaping
//! (zero-filled trend, counter ordering) happens here.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Days covered by the registration trend, today included.
pub const TREND_DAYS: i64 = 30;

/// Raw aggregate counts as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total: u64,
    pub bibs_given: u64,
    pub tshirts_given: u64,
    /// Registrations per UTC day since the trend start. Days with none are absent.
    pub daily: Vec<(NaiveDate, u64)>,
    pub by_distance: Vec<Bucket>,
    pub by_tshirt_size: Vec<Bucket>,
    pub by_gender: Vec<Bucket>,
    pub counters: Vec<CounterRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub name: String,
    pub value: u64,
}

/// Group-by row for one counter value. `counter_no` is `None` for
/// participants not yet sent to a counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterRow {
    pub counter_no: Option<String>,
    pub total: u64,
    pub bibs: u64,
    pub tshirts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterStats {
    pub counter_no: String,
    pub total: u64,
    pub bibs: u64,
    pub tshirts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// `Jan 04` style label.
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub bibs_distributed: u64,
    pub tshirts_distributed: u64,
    pub trend: Vec<TrendPoint>,
    pub distance: Vec<Bucket>,
    pub tshirt: Vec<Bucket>,
    pub gender: Vec<Bucket>,
    pub counters: Vec<CounterStats>,
}

/// First day of the trend window ending on `today`.
pub fn trend_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(TREND_DAYS - 1)
}

/// One point per day from [`trend_start`] through `today`, oldest first.
pub fn registration_trend(daily: &[(NaiveDate, u64)], today: NaiveDate) -> Vec<TrendPoint> {
    let counts: HashMap<NaiveDate, u64> = daily.iter().copied().collect();
    trend_start(today)
        .iter_days()
        .take(TREND_DAYS as usize)
        .map(|day| TrendPoint {
            date: day.format("%b %d").to_string(),
            count: counts.get(&day).copied().unwrap_or(0),
        })
        .collect()
}

/// Drop unassigned participants and sort by counter label.
pub fn counter_breakdown(rows: Vec<CounterRow>) -> Vec<CounterStats> {
    let mut counters: Vec<CounterStats> = rows
        .into_iter()
        .filter_map(|row| {
            let counter_no = row.counter_no.filter(|c| !c.trim().is_empty())?;
            Some(CounterStats {
                counter_no,
                total: row.total,
                bibs: row.bibs,
                tshirts: row.tshirts,
            })
        })
        .collect();
    counters.sort_by(|a, b| a.counter_no.cmp(&b.counter_no));
    counters
}

impl DashboardStats {
    pub fn from_snapshot(snapshot: StatsSnapshot, today: NaiveDate) -> Self {
        Self {
            total_users: snapshot.total,
            bibs_distributed: snapshot.bibs_given,
            tshirts_distributed: snapshot.tshirts_given,
            trend: registration_trend(&snapshot.daily, today),
            distance: snapshot.by_distance,
            tshirt: snapshot.by_tshirt_size,
            gender: snapshot.by_gender,
            counters: counter_breakdown(snapshot.counters),
        }
    }
}
