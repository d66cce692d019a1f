//! Notification channel that records deliveries instead of sending them

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use tinderbox_core::NotificationChannel;
use tinderbox_domain::{PopularPersonAlert, Result as DomainResult, TinderboxError};

#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<(String, PopularPersonAlert)>>,
    failing: Mutex<HashSet<i64>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every delivery for this person fail until [`Self::recover`].
    pub fn fail_for(&self, person_id: i64) {
        self.failing.lock().unwrap().insert(person_id);
    }

    pub fn recover(&self, person_id: i64) {
        self.failing.lock().unwrap().remove(&person_id);
    }

    pub fn sent(&self) -> Vec<(String, PopularPersonAlert)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_for(&self, person_id: i64) -> usize {
        self.sent.lock().unwrap().iter().filter(|(_, a)| a.person_id == person_id).count()
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn send(&self, recipient: &str, alert: &PopularPersonAlert) -> DomainResult<()> {
        if self.failing.lock().unwrap().contains(&alert.person_id) {
            return Err(TinderboxError::NotificationDelivery(format!(
                "relay rejected alert for person {}",
                alert.person_id
            )));
        }
        self.sent.lock().unwrap().push((recipient.to_string(), alert.clone()));
        Ok(())
    }
}
