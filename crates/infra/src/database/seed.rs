//! Demo data for local development
//!
//! Three hand-written profiles followed by fifty generated ones, plus a few
//! demo users to swipe with. Seeding is skipped for tables that already hold
//! data so running it twice is harmless.

use tinderbox_core::PersonRepository;
use tinderbox_domain::{NewPerson, Result as DomainResult};
use tracing::info;

use super::user_repository::SqliteUserRepository;

const FIRST_NAMES: [&str; 10] =
    ["Alex", "Blake", "Casey", "Drew", "Elliot", "Finley", "Gray", "Harper", "Indigo", "Jordan"];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];
const CITIES: [&str; 10] = [
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Antonio",
    "San Diego",
    "Dallas",
    "Austin",
];
const STATES: [&str; 10] = ["NY", "CA", "IL", "TX", "AZ", "PA", "FL", "OH", "GA", "NC"];

const GENERATED_PEOPLE: usize = 50;
const DEMO_USERS: [(&str, &str); 5] = [
    ("Demo User 1", "demo1@tinderbox.local"),
    ("Demo User 2", "demo2@tinderbox.local"),
    ("Demo User 3", "demo3@tinderbox.local"),
    ("Demo User 4", "demo4@tinderbox.local"),
    ("Demo User 5", "demo5@tinderbox.local"),
];

/// What a seeding run inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub people_created: usize,
    pub users_created: usize,
}

fn picture(n: usize) -> String {
    format!("https://picsum.photos/400/500?random={n}")
}

/// The seed profiles, in insertion order.
pub fn seed_people() -> Vec<NewPerson> {
    let mut people = vec![
        NewPerson::new("Emma Watson", 28, vec![picture(1), picture(2)], "New York, NY"),
        NewPerson::new("John Smith", 32, vec![picture(3), picture(4)], "Los Angeles, CA"),
        NewPerson::new("Sarah Johnson", 25, vec![picture(5)], "Chicago, IL"),
    ];

    people.extend((0..GENERATED_PEOPLE).map(|i| {
        NewPerson::new(
            format!("{} {}", FIRST_NAMES[i % 10], LAST_NAMES[(i + 5) % 10]),
            18 + (i % 43) as u32,
            vec![picture(100 + i)],
            format!("{}, {}", CITIES[i % 10], STATES[i % 10]),
        )
    }));

    people
}

/// Insert the seed set into empty tables.
pub async fn seed_database(
    people: &dyn PersonRepository,
    users: &SqliteUserRepository,
) -> DomainResult<SeedReport> {
    let mut report = SeedReport::default();

    for (name, email) in DEMO_USERS {
        if users.find_by_email(email).await?.is_none() {
            users.create(name, email).await?;
            report.users_created += 1;
        }
    }

    if people.count().await? == 0 {
        for person in seed_people() {
            people.create(person).await?;
            report.people_created += 1;
        }
    } else {
        info!("people table already populated; skipping profile seed");
    }

    info!(
        people_created = report.people_created,
        users_created = report.users_created,
        "database seeded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::database::{DbManager, SqlitePersonRepository};

    #[test]
    fn generated_profiles_follow_the_rotation() {
        let people = seed_people();
        assert_eq!(people.len(), 53);

        let first_generated = &people[3];
        assert_eq!(first_generated.name, "Alex Garcia");
        assert_eq!(first_generated.age, 18);
        assert_eq!(first_generated.location, "New York, NY");
        assert_eq!(first_generated.pictures, vec![picture(100)]);

        let last = &people[52];
        assert_eq!(last.name, "Jordan Jones");
        assert_eq!(last.age, 18 + 49 % 43);
        assert_eq!(last.location, "Austin, NC");
        assert!(people.iter().all(|p| p.validate().is_ok()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn seeding_twice_does_not_duplicate() {
        let temp = TempDir::new().unwrap();
        let manager = DbManager::new(temp.path().join("seed.db"), 2).unwrap();
        manager.run_migrations().unwrap();
        let db = Arc::new(manager);
        let people = SqlitePersonRepository::new(Arc::clone(&db));
        let users = SqliteUserRepository::new(db);

        let first = seed_database(&people, &users).await.unwrap();
        let second = seed_database(&people, &users).await.unwrap();

        assert_eq!(first, SeedReport { people_created: 53, users_created: 5 });
        assert_eq!(second, SeedReport::default());
        assert_eq!(people.count().await.unwrap(), 53);
    }
}
