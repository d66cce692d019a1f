//! JSON shapes returned by the HTTP layer

use chrono::{DateTime, Utc};
use serde::Serialize;
use tinderbox_domain::{Dislike, Like, LikedPerson, Page, Person};

/// Public view of a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonResource {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub pictures: Vec<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_at: Option<DateTime<Utc>>,
}

impl From<Person> for PersonResource {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            age: person.age,
            pictures: person.pictures,
            location: person.location,
            liked_at: None,
        }
    }
}

impl From<LikedPerson> for PersonResource {
    fn from(liked: LikedPerson) -> Self {
        Self { liked_at: Some(liked.liked_at), ..Self::from(liked.person) }
    }
}

/// Paginated envelope
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub current_page: u32,
    pub data: Vec<T>,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u64,
}

impl<T> From<Page<T>> for Paginated<T> {
    fn from(page: Page<T>) -> Self {
        let last_page = page.last_page();
        Self {
            current_page: page.page,
            per_page: page.per_page,
            total: page.total,
            last_page,
            data: page.items,
        }
    }
}

/// Unpaginated list envelope
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct LikeCreated {
    pub message: &'static str,
    pub like: Like,
}

#[derive(Debug, Serialize)]
pub struct DislikeCreated {
    pub message: &'static str,
    pub dislike: Dislike,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tinderbox_domain::PageRequest;

    use super::*;

    fn person() -> Person {
        let at = Utc.with_ymd_and_hms(2025, 11, 9, 8, 0, 0).unwrap();
        Person {
            id: 3,
            name: "Sarah Johnson".into(),
            age: 25,
            pictures: vec!["https://picsum.photos/400/500?random=5".into()],
            location: "Chicago, IL".into(),
            like_count: 12,
            admin_notified: false,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn person_resource_hides_internal_fields() {
        let json = serde_json::to_value(PersonResource::from(person())).unwrap();
        assert!(json.get("like_count").is_none());
        assert!(json.get("admin_notified").is_none());
        assert!(json.get("liked_at").is_none());
        assert_eq!(json["location"], "Chicago, IL");
    }

    #[test]
    fn paginated_envelope_reports_last_page() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2).unwrap(), 5);
        let json = serde_json::to_value(Paginated::from(page)).unwrap();
        assert_eq!(json["current_page"], 1);
        assert_eq!(json["last_page"], 3);
        assert_eq!(json["total"], 5);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
