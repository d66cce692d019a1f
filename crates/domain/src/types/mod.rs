//! Domain types and models

pub mod notification;
pub mod page;
pub mod person;
pub mod preference;
pub mod user;

pub use notification::{PopularPersonAlert, SweepReport};
pub use page::{Page, PageRequest};
pub use person::{LikedPerson, NewPerson, Person};
pub use preference::{Dislike, Like, PreferenceAction, PreferenceRecord};
pub use user::User;
