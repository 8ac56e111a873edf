use std::time::Duration;

use chrono::Utc;
use tokio::time::{MissedTickBehavior, interval};

use crate::infra::db::DbSessionRepository;
use crate::usecase::session_sweep::PurgeExpiredSessionsUseCase;

/// Periodically delete expired sessions. The first sweep runs immediately.
pub fn spawn_session_sweeper(
    sessions: DbSessionRepository,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let usecase = PurgeExpiredSessionsUseCase { sessions };
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match usecase.execute(Utc::now()).await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "purged expired sessions"),
                Err(e) => tracing::warn!(error = %format!("{e:#}"), "session sweep failed"),
            }
        }
    })
}
