//! In-memory implementation of the storage ports
//!
//! One store backs all three ports so likes, dislikes, and counters stay
//! consistent the same way a single database would keep them.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tinderbox_core::{
    plan_transition, PairState, PersonRepository, PreferenceRepository, UserDirectory,
};
use tinderbox_domain::{
    LikedPerson, NewPerson, Page, PageRequest, Person, PreferenceAction, PreferenceRecord,
    Result as DomainResult, TinderboxError,
};

#[derive(Default)]
struct State {
    people: BTreeMap<i64, Person>,
    likes: HashMap<(i64, i64), PreferenceRecord>,
    dislikes: HashMap<(i64, i64), PreferenceRecord>,
    users: HashSet<i64>,
    next_id: i64,
    ticks: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    // Strictly increasing timestamps so newest-first ordering is deterministic
    fn now(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        base_time() + Duration::seconds(self.ticks)
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 9, 8, 0, 0).single().expect("valid base time")
}

/// Thread-safe in-memory store.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register user IDs with the directory.
    pub fn with_users(self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.state.lock().unwrap().users.extend(ids);
        self
    }

    /// Insert a person directly and return its ID.
    pub fn add_person(&self, name: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = state.now();
        state.people.insert(id, person(id, name, now));
        id
    }

    /// Force a person's counter, bypassing the ledger.
    pub fn set_like_count(&self, id: i64, like_count: i64) {
        let mut state = self.state.lock().unwrap();
        if let Some(person) = state.people.get_mut(&id) {
            person.like_count = like_count;
        }
    }

    pub fn person(&self, id: i64) -> Person {
        self.state.lock().unwrap().people.get(&id).cloned().expect("person exists")
    }

    pub fn like_count(&self, id: i64) -> i64 {
        self.person(id).like_count
    }

    pub fn active_likes_for(&self, person_id: i64) -> usize {
        self.state.lock().unwrap().likes.keys().filter(|(_, p)| *p == person_id).count()
    }
}

fn person(id: i64, name: &str, now: DateTime<Utc>) -> Person {
    Person {
        id,
        name: name.to_string(),
        age: 30,
        pictures: vec![format!("https://picsum.photos/400/500?random={id}")],
        location: "Austin, TX".to_string(),
        like_count: 0,
        admin_notified: false,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl PersonRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Person>> {
        Ok(self.state.lock().unwrap().people.get(&id).cloned())
    }

    async fn create(&self, new_person: NewPerson) -> DomainResult<Person> {
        new_person.validate()?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = state.now();
        let mut created = person(id, &new_person.name, now);
        created.age = new_person.age;
        created.pictures = new_person.pictures;
        created.location = new_person.location;
        state.people.insert(id, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let mut state = self.state.lock().unwrap();
        state.likes.retain(|(_, p), _| *p != id);
        state.dislikes.retain(|(_, p), _| *p != id);
        Ok(state.people.remove(&id).is_some())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.state.lock().unwrap().people.len() as u64)
    }

    async fn list_recommended(
        &self,
        excluding_user: Option<i64>,
        page: PageRequest,
    ) -> DomainResult<Page<Person>> {
        let state = self.state.lock().unwrap();
        let excluded: HashSet<i64> = match excluding_user {
            Some(user_id) => state
                .likes
                .keys()
                .chain(state.dislikes.keys())
                .filter(|(u, _)| *u == user_id)
                .map(|(_, p)| *p)
                .collect(),
            None => HashSet::new(),
        };

        let mut eligible: Vec<Person> =
            state.people.values().filter(|p| !excluded.contains(&p.id)).cloned().collect();
        eligible.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = eligible.len() as u64;
        let items = eligible
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(Page::new(items, page, total))
    }

    async fn find_popular_unnotified(&self, threshold: i64) -> DomainResult<Vec<Person>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .people
            .values()
            .filter(|p| p.like_count > threshold && !p.admin_notified)
            .cloned()
            .collect())
    }

    async fn mark_notified(&self, id: i64) -> DomainResult<bool> {
        let mut state = self.state.lock().unwrap();
        match state.people.get_mut(&id) {
            Some(person) if !person.admin_notified => {
                person.admin_notified = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryStore {
    async fn apply(
        &self,
        user_id: i64,
        person_id: i64,
        action: PreferenceAction,
    ) -> DomainResult<PreferenceRecord> {
        let mut state = self.state.lock().unwrap();
        if !state.people.contains_key(&person_id) {
            return Err(TinderboxError::NotFound(format!("person {person_id}")));
        }

        let key = (user_id, person_id);
        let current = PairState {
            has_like: state.likes.contains_key(&key),
            has_dislike: state.dislikes.contains_key(&key),
        };
        let transition = plan_transition(action, current)?;

        let record =
            PreferenceRecord { id: state.next_id(), user_id, person_id, created_at: state.now() };
        match transition.insert {
            PreferenceAction::Like => {
                state.likes.insert(key, record.clone());
                if transition.remove_opposite {
                    state.dislikes.remove(&key);
                }
            }
            PreferenceAction::Dislike => {
                state.dislikes.insert(key, record.clone());
                if transition.remove_opposite {
                    state.likes.remove(&key);
                }
            }
        }
        if let Some(person) = state.people.get_mut(&person_id) {
            person.like_count += transition.like_count_delta;
        }
        Ok(record)
    }

    async fn pair_state(&self, user_id: i64, person_id: i64) -> DomainResult<PairState> {
        let state = self.state.lock().unwrap();
        let key = (user_id, person_id);
        Ok(PairState {
            has_like: state.likes.contains_key(&key),
            has_dislike: state.dislikes.contains_key(&key),
        })
    }

    async fn list_liked(&self, user_id: i64) -> DomainResult<Vec<LikedPerson>> {
        let state = self.state.lock().unwrap();
        let mut liked: Vec<LikedPerson> = state
            .likes
            .values()
            .filter(|like| like.user_id == user_id)
            .filter_map(|like| {
                state
                    .people
                    .get(&like.person_id)
                    .map(|p| LikedPerson { person: p.clone(), liked_at: like.created_at })
            })
            .collect();
        liked.sort_by(|a, b| b.liked_at.cmp(&a.liked_at));
        Ok(liked)
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn exists(&self, user_id: i64) -> DomainResult<bool> {
        Ok(self.state.lock().unwrap().users.contains(&user_id))
    }
}
