//! Application context - dependency injection container

use std::sync::Arc;

use tinderbox_core::{NotificationChannel, PopularityNotifier, PreferenceLedger};
use tinderbox_domain::{Config, Result};
use tinderbox_infra::database::{
    DbManager, SqlitePersonRepository, SqlitePreferenceRepository, SqliteUserRepository,
};
use tinderbox_infra::notification::build_channel;
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub people: Arc<SqlitePersonRepository>,
    pub users: Arc<SqliteUserRepository>,
    pub ledger: Arc<PreferenceLedger>,
    pub notifier: Arc<PopularityNotifier>,
}

impl AppContext {
    /// Open the database, apply migrations, and build the services.
    ///
    /// The notification channel is chosen by `config.mail.driver`.
    pub fn new(config: Config) -> Result<Self> {
        let channel = build_channel(&config.mail)?;
        Self::with_channel(config, channel)
    }

    /// Same as [`AppContext::new`] with an explicit notification channel.
    pub fn with_channel(config: Config, channel: Arc<dyn NotificationChannel>) -> Result<Self> {
        let db = Arc::new(DbManager::from_config(&config.database)?);
        db.run_migrations()?;

        let people = Arc::new(SqlitePersonRepository::new(Arc::clone(&db)));
        let users = Arc::new(SqliteUserRepository::new(Arc::clone(&db)));
        let preferences = Arc::new(SqlitePreferenceRepository::new(Arc::clone(&db)));

        let ledger = Arc::new(PreferenceLedger::new(people.clone(), preferences, users.clone()));
        let notifier =
            Arc::new(PopularityNotifier::new(people.clone(), channel, config.notifier.clone()));

        info!(
            db_path = %db.path().display(),
            threshold = config.notifier.threshold,
            mail_driver = %config.mail.driver,
            "application context ready"
        );

        Ok(Self { config, db, people, users, ledger, notifier })
    }

    /// Whether the database answers queries.
    pub async fn database_healthy(&self) -> bool {
        let db = Arc::clone(&self.db);
        matches!(tokio::task::spawn_blocking(move || db.health_check()).await, Ok(Ok(())))
    }
}
