//! Cron-driven popularity sweep.
//!
//! Triggers a [`SweepJob`] on a cron schedule (hourly by default). Join
//! handles are tracked, cancellation is explicit, and every lifecycle step is
//! wrapped in a timeout. Each start builds a fresh `JobScheduler`, so a
//! stopped scheduler can be started again.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tinderbox_core::PopularityNotifier;
//! use tinderbox_infra::scheduling::{PopularityScheduler, PopularitySchedulerConfig, SchedulerResult};
//!
//! # async fn example(notifier: Arc<PopularityNotifier>) -> SchedulerResult<()> {
//! let mut scheduler =
//!     PopularityScheduler::with_config(PopularitySchedulerConfig::default(), notifier)?;
//!
//! scheduler.start().await?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tinderbox_core::PopularityNotifier;
use tinderbox_domain::{SchedulerConfig, TinderboxError};
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Work triggered on every tick.
#[async_trait]
pub trait SweepJob: Send + Sync {
    async fn run(&self) -> Result<(), TinderboxError>;
}

#[async_trait]
impl SweepJob for PopularityNotifier {
    async fn run(&self) -> Result<(), TinderboxError> {
        self.sweep().await.map(|_| ())
    }
}

/// Configuration for the popularity scheduler.
#[derive(Debug, Clone)]
pub struct PopularitySchedulerConfig {
    /// Six-field cron expression (seconds first).
    pub cron_expression: String,
    /// Timeout applied to a single sweep.
    pub job_timeout: Duration,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
    /// Timeout for awaiting the monitor task join handle.
    pub join_timeout: Duration,
}

impl Default for PopularitySchedulerConfig {
    fn default() -> Self {
        Self::from(&SchedulerConfig::default())
    }
}

impl From<&SchedulerConfig> for PopularitySchedulerConfig {
    fn from(config: &SchedulerConfig) -> Self {
        Self {
            cron_expression: config.cron_expression.clone(),
            job_timeout: Duration::from_secs(config.job_timeout_secs),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
            join_timeout: Duration::from_secs(5),
        }
    }
}

/// Popularity scheduler with explicit lifecycle management.
pub struct PopularityScheduler {
    scheduler: Option<JobScheduler>,
    config: PopularitySchedulerConfig,
    monitor_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
    job: Arc<dyn SweepJob>,
}

impl PopularityScheduler {
    /// Create a scheduler for `job` with the given configuration.
    ///
    /// The cron expression is validated here so a bad schedule fails at
    /// startup instead of on first start.
    pub fn with_config(
        config: PopularitySchedulerConfig,
        job: Arc<dyn SweepJob>,
    ) -> SchedulerResult<Self> {
        Self::build_job(&config, Arc::clone(&job), CancellationToken::new())?;

        Ok(Self {
            scheduler: None,
            config,
            monitor_handle: None,
            cancellation: CancellationToken::new(),
            job,
        })
    }

    /// Start the scheduler, spawning the monitoring task.
    #[instrument(skip(self), fields(cron = %self.config.cron_expression))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let start_timeout = self.config.start_timeout;
        let job = Self::build_job(&self.config, Arc::clone(&self.job), self.cancellation.clone())?;
        let scheduler = tokio::time::timeout(start_timeout, async move {
            let scheduler = JobScheduler::new()
                .await
                .map_err(|source| SchedulerError::CreationFailed { source })?;
            scheduler
                .add(job)
                .await
                .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;
            scheduler.start().await.map_err(|source| SchedulerError::StartFailed { source })?;
            Ok::<_, SchedulerError>(scheduler)
        })
        .await
        .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })??;

        let cancel = self.cancellation.clone();
        self.monitor_handle = Some(tokio::spawn(async move {
            cancel.cancelled().await;
            debug!("Popularity scheduler monitor cancelled");
        }));
        self.scheduler = Some(scheduler);

        info!("Popularity scheduler started");
        Ok(())
    }

    /// Stop the scheduler and wait for the monitor task to finish.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        if let Some(mut scheduler) = self.scheduler.take() {
            let stop_timeout = self.config.stop_timeout;
            tokio::time::timeout(stop_timeout, scheduler.shutdown())
                .await
                .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?
                .map_err(|source| SchedulerError::StopFailed { source })?;
        }

        if let Some(handle) = self.monitor_handle.take() {
            let join_timeout = self.config.join_timeout;
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })??;
        }

        info!("Popularity scheduler stopped");
        Ok(())
    }

    /// Returns true when the monitor task is active.
    pub fn is_running(&self) -> bool {
        self.monitor_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn build_job(
        config: &PopularitySchedulerConfig,
        job: Arc<dyn SweepJob>,
        cancel: CancellationToken,
    ) -> SchedulerResult<Job> {
        let job_timeout = config.job_timeout;

        Job::new_async(config.cron_expression.as_str(), move |_id, _lock| {
            let job = Arc::clone(&job);
            let cancel = cancel.clone();

            Box::pin(async move {
                if cancel.is_cancelled() {
                    return;
                }
                let started = Instant::now();

                match tokio::time::timeout(job_timeout, job.run()).await {
                    Ok(Ok(())) => {
                        debug!(elapsed_ms = started.elapsed().as_millis(), "Popularity sweep finished");
                    }
                    Ok(Err(err)) => {
                        error!(error = %err, "Popularity sweep failed");
                    }
                    Err(_) => {
                        warn!(timeout_secs = job_timeout.as_secs(), "Popularity sweep timed out");
                    }
                }
            })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed { source })
    }
}

impl Drop for PopularityScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("PopularityScheduler dropped while running; cancelling tasks");
            self.cancellation.cancel();
        }
    }
}
