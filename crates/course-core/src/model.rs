//! Domain Models
//!
//! Identifiers, resource paths and the wire shapes exchanged with the
//! course API. Prices use `rust_decimal` and travel as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Course identifier, opaque to the client
    CourseId
);
string_id!(
    /// Chapter identifier, opaque to the client
    ChapterId
);

/// Which kind of resource an editable field belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Course,
    Chapter,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Course => "Course",
            Scope::Chapter => "Chapter",
        }
    }

    /// Toast shown after a committed update
    pub fn success_message(&self) -> &'static str {
        match self {
            Scope::Course => "Course updated!",
            Scope::Chapter => "Chapter updated!",
        }
    }
}

/// Target of a partial update: a course, or a chapter inside a course
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePath {
    course_id: CourseId,
    chapter_id: Option<ChapterId>,
}

impl ResourcePath {
    pub fn course(course_id: CourseId) -> Self {
        Self {
            course_id,
            chapter_id: None,
        }
    }

    pub fn chapter(course_id: CourseId, chapter_id: ChapterId) -> Self {
        Self {
            course_id,
            chapter_id: Some(chapter_id),
        }
    }

    /// Checkout endpoint for a course
    pub fn checkout(course_id: &CourseId) -> String {
        format!("/api/courses/{course_id}/checkout")
    }

    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    pub fn chapter_id(&self) -> Option<&ChapterId> {
        self.chapter_id.as_ref()
    }

    pub fn scope(&self) -> Scope {
        if self.chapter_id.is_some() {
            Scope::Chapter
        } else {
            Scope::Course
        }
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/api/courses/{}", self.course_id)?;
        if let Some(chapter_id) = &self.chapter_id {
            write!(f, "/chapters/{chapter_id}")?;
        }
        Ok(())
    }
}

/// Partial update body. Only the populated fields are serialized.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_free: Option<bool>,
}

/// One attempted mutation
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateRequest {
    pub path: ResourcePath,
    pub patch: Patch,
}

/// Response of the checkout endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Hosted payment page to redirect to
    pub url: String,
}

/// Server-rendered state of a course, re-fetched after every commit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSnapshot {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub chapters: Vec<ChapterSnapshot>,
}

impl CourseSnapshot {
    /// `(filled, total)` over the fields required before publishing
    pub fn completion(&self) -> (usize, usize) {
        let required = [
            !self.title.is_empty(),
            self.description.as_deref().is_some_and(|d| !d.is_empty()),
            self.price.is_some_and(|p| !p.is_zero()),
        ];
        (required.iter().filter(|done| **done).count(), required.len())
    }
}

/// Server-rendered state of a chapter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSnapshot {
    pub id: ChapterId,
    pub course_id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_free: bool,
}

impl ChapterSnapshot {
    pub fn completion(&self) -> (usize, usize) {
        let required = [
            !self.title.is_empty(),
            self.description.as_deref().is_some_and(|d| !d.is_empty()),
        ];
        (required.iter().filter(|done| **done).count(), required.len())
    }
}
