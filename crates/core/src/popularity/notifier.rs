//! Popularity notifier - the threshold sweep
//!
//! Each sweep finds persons whose like count exceeds the configured threshold
//! and who have not been notified yet, sends one alert per person, and marks
//! each delivered person as notified. The notified flag is the idempotence
//! gate: a marked person is never swept again, whatever happens to their count
//! later. A failed delivery leaves the person unmarked for the next sweep and
//! does not stop the rest of the sweep.

use std::sync::Arc;

use tinderbox_domain::{NotifierConfig, PopularPersonAlert, Result, SweepReport};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use super::ports::NotificationChannel;
use crate::people::ports::PersonRepository;

/// Periodic, idempotent popularity sweep
pub struct PopularityNotifier {
    people: Arc<dyn PersonRepository>,
    channel: Arc<dyn NotificationChannel>,
    config: NotifierConfig,
    // Serializes sweeps within this process
    sweep_lock: Mutex<()>,
}

impl PopularityNotifier {
    pub fn new(
        people: Arc<dyn PersonRepository>,
        channel: Arc<dyn NotificationChannel>,
        config: NotifierConfig,
    ) -> Self {
        Self { people, channel, config, sweep_lock: Mutex::new(()) }
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Run one sweep and report what happened.
    ///
    /// Only the initial candidate query can fail the whole sweep; per-person
    /// failures are logged and collected in [`SweepReport::failed`].
    #[instrument(skip(self), fields(threshold = self.config.threshold))]
    pub async fn sweep(&self) -> Result<SweepReport> {
        let _guard = self.sweep_lock.lock().await;

        let candidates = self.people.find_popular_unnotified(self.config.threshold).await?;
        let mut report = SweepReport { eligible: candidates.len(), ..SweepReport::default() };

        for person in &candidates {
            let alert = PopularPersonAlert::from(person);

            if let Err(err) = self.channel.send(&self.config.recipient, &alert).await {
                warn!(person_id = person.id, error = %err, "popularity alert delivery failed");
                report.failed.push(person.id);
                continue;
            }

            match self.people.mark_notified(person.id).await {
                Ok(true) => {
                    info!(
                        person_id = person.id,
                        like_count = person.like_count,
                        "notification sent for {}",
                        alert.headline()
                    );
                    report.notified.push(person.id);
                }
                Ok(false) => {
                    debug!(person_id = person.id, "person already marked notified");
                }
                Err(err) => {
                    // Delivered but not marked: the next sweep sends it again.
                    error!(person_id = person.id, error = %err, "failed to mark person notified");
                    report.failed.push(person.id);
                }
            }
        }

        info!(
            eligible = report.eligible,
            notified = report.notified_count(),
            failed = report.failed_count(),
            "popularity sweep finished"
        );
        Ok(report)
    }
}
