use chrono::Utc;

use crate::domain::repository::StatsRepository;
use crate::domain::stats::{DashboardStats, trend_start};
use crate::error::ParticipantsServiceError;

pub struct DashboardStatsUseCase<S: StatsRepository> {
    pub stats: S,
}

impl<S: StatsRepository> DashboardStatsUseCase<S> {
    pub async fn execute(&self) -> Result<DashboardStats, ParticipantsServiceError> {
        let today = Utc::now().date_naive();
        let snapshot = self.stats.snapshot(trend_start(today)).await?;
        Ok(DashboardStats::from_snapshot(snapshot, today))
    }
}
