//! Retrain Scheduler
//!
//! Re-runs the training pipeline on a fixed interval so a long-running
//! advisor picks up new CSV exports without a restart.
//!
//! ```bash
//! # Retrain every 10 minutes
//! HULL_RETRAIN_INTERVAL_SECS=600 hull-advisor watch
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::TrainingConfig;
use crate::pipeline::HullAdvisor;

pub const RETRAIN_INTERVAL_ENV: &str = "HULL_RETRAIN_INTERVAL_SECS";

/// Retrain interval in seconds.
///
/// Precedence: `HULL_RETRAIN_INTERVAL_SECS` env var > `training.retrain_interval_secs` TOML.
/// Zero is bumped to one second.
pub fn get_interval_secs(config: &TrainingConfig) -> u64 {
    std::env::var(RETRAIN_INTERVAL_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(config.retrain_interval_secs)
        .max(1)
}

pub fn get_interval(config: &TrainingConfig) -> Duration {
    Duration::from_secs(get_interval_secs(config))
}

pub struct RetrainScheduler {
    advisor: Arc<HullAdvisor>,
    interval: Duration,
}

impl RetrainScheduler {
    pub fn new(advisor: Arc<HullAdvisor>) -> Self {
        let interval = get_interval(&advisor.config().training);
        info!(
            interval_secs = interval.as_secs(),
            source = advisor.source_name(),
            "Retrain scheduler created (env: {RETRAIN_INTERVAL_ENV})"
        );
        Self { advisor, interval }
    }

    pub fn with_interval(advisor: Arc<HullAdvisor>, interval: Duration) -> Self {
        Self {
            advisor,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Train on every tick until `cancel_token` fires. The first tick is
    /// immediate. Returns the number of completed runs.
    pub async fn run(self, cancel_token: CancellationToken) -> u64 {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut runs = 0u64;

        loop {
            tokio::select! {
                () = cancel_token.cancelled() => {
                    info!(runs, "Retrain scheduler received shutdown signal");
                    return runs;
                }
                _ = ticker.tick() => {
                    let advisor = Arc::clone(&self.advisor);
                    match tokio::task::spawn_blocking(move || advisor.train_model()).await {
                        Ok(Ok(summary)) => {
                            runs += 1;
                            info!(
                                runs,
                                training_rows = summary.training_rows,
                                model_trained = self.advisor.snapshot().model.is_trained(),
                                "Scheduled retrain complete"
                            );
                        }
                        Ok(Err(e)) => {
                            warn!(error = %e, "Scheduled retrain failed, keeping previous model");
                        }
                        Err(e) => {
                            error!(error = %e, "Retrain task panicked");
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::InMemorySource;
    use crate::config::HullConfig;
    use crate::types::FleetDataset;

    #[test]
    fn interval_falls_back_to_config() {
        let cfg = TrainingConfig {
            retrain_interval_secs: 42,
            ..TrainingConfig::default()
        };
        if std::env::var(RETRAIN_INTERVAL_ENV).is_err() {
            assert_eq!(get_interval_secs(&cfg), 42);
        }
        let zero = TrainingConfig {
            retrain_interval_secs: 0,
            ..TrainingConfig::default()
        };
        assert!(get_interval_secs(&zero) >= 1);
    }

    #[tokio::test]
    async fn stops_on_cancel_after_first_run() {
        let advisor = Arc::new(HullAdvisor::new(
            HullConfig::default(),
            Box::new(InMemorySource::new(FleetDataset::default())),
        ));
        let scheduler = RetrainScheduler::with_interval(advisor, Duration::from_secs(3600));
        let token = CancellationToken::new();
        let handle = tokio::spawn(scheduler.run(token.clone()));

        tokio::time::sleep(Duration::from_millis(200)).await;
        token.cancel();
        let runs = handle.await.unwrap();
        assert_eq!(runs, 1);
    }
}
