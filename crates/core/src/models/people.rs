//! Records about people: testimonials, team members, profiles and users.
//!
//! These are flat records: a name, some descriptive text, an optional photo
//! (usually a data URL from the image uploader) and tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::Record;
use crate::types::{Email, ProfileId, TeamMemberId, TestimonialId, UserId, UserRole};
use crate::validate::{Validate, ValidationError, required};

// =============================================================================
// Testimonials
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub role: String,
    pub company: String,
    pub content: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TestimonialDraft {
    pub name: String,
    pub role: String,
    pub company: String,
    pub content: String,
    pub rating: u8,
    pub photo: Option<String>,
}

impl Default for TestimonialDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: String::new(),
            company: String::new(),
            content: String::new(),
            rating: 5,
            photo: None,
        }
    }
}

impl Validate for TestimonialDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("content", &self.content)?;
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::new("rating", "rating must be between 1 and 5"));
        }
        Ok(())
    }
}

impl Record for Testimonial {
    type Id = TestimonialId;
    type Draft = TestimonialDraft;

    const COLLECTION_KEY: &'static str = "testimonials";
    const LABEL: &'static str = "testimonial";

    fn from_draft(id: TestimonialId, draft: TestimonialDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            role: draft.role,
            company: draft.company,
            content: draft.content,
            rating: draft.rating,
            photo: draft.photo,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: TestimonialDraft, now: DateTime<Utc>) {
        self.name = draft.name.trim().to_string();
        self.role = draft.role;
        self.company = draft.company;
        self.content = draft.content;
        self.rating = draft.rating;
        self.photo = draft.photo;
        self.updated_at = now;
    }

    fn id(&self) -> &TestimonialId {
        &self.id
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.content.as_str(), self.company.as_str()]
    }
}

// =============================================================================
// Team members
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub name: String,
    pub position: String,
    pub bio: String,
    pub photo: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamMemberDraft {
    pub name: String,
    pub position: String,
    pub bio: String,
    pub photo: Option<String>,
    pub categories: Vec<String>,
}

impl Validate for TeamMemberDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("position", &self.position)
    }
}

impl Record for TeamMember {
    type Id = TeamMemberId;
    type Draft = TeamMemberDraft;

    const COLLECTION_KEY: &'static str = "teamMembers";
    const LABEL: &'static str = "team member";

    fn from_draft(id: TeamMemberId, draft: TeamMemberDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            position: draft.position.trim().to_string(),
            bio: draft.bio,
            photo: draft.photo,
            categories: draft.categories,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: TeamMemberDraft, now: DateTime<Utc>) {
        self.name = draft.name.trim().to_string();
        self.position = draft.position.trim().to_string();
        self.bio = draft.bio;
        self.photo = draft.photo;
        self.categories = draft.categories;
        self.updated_at = now;
    }

    fn id(&self) -> &TeamMemberId {
        &self.id
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.position.as_str(), self.bio.as_str()]
    }
}

// =============================================================================
// Profiles
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub headline: String,
    pub description: String,
    pub photo: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub name: String,
    pub headline: String,
    pub description: String,
    pub photo: Option<String>,
    pub tags: Vec<String>,
}

impl Validate for ProfileDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)
    }
}

impl Record for Profile {
    type Id = ProfileId;
    type Draft = ProfileDraft;

    const COLLECTION_KEY: &'static str = "profiles";
    const LABEL: &'static str = "profile";

    fn from_draft(id: ProfileId, draft: ProfileDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            headline: draft.headline,
            description: draft.description,
            photo: draft.photo,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: ProfileDraft, now: DateTime<Utc>) {
        self.name = draft.name.trim().to_string();
        self.headline = draft.headline;
        self.description = draft.description;
        self.photo = draft.photo;
        self.tags = draft.tags;
        self.updated_at = now;
    }

    fn id(&self) -> &ProfileId {
        &self.id
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.headline.as_str(),
            self.description.as_str(),
        ]
    }
}

// =============================================================================
// Users
// =============================================================================

/// A person who uses the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub photo: Option<String>,
}

impl Validate for UserDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        Email::parse(&self.email).map_err(|e| ValidationError::new("email", e.to_string()))?;
        Ok(())
    }
}

impl Record for User {
    type Id = UserId;
    type Draft = UserDraft;

    const COLLECTION_KEY: &'static str = "users";
    const LABEL: &'static str = "user";

    fn from_draft(id: UserId, draft: UserDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            role: draft.role,
            photo: draft.photo,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: UserDraft, now: DateTime<Utc>) {
        self.name = draft.name.trim().to_string();
        self.email = draft.email.trim().to_string();
        self.role = draft.role;
        self.photo = draft.photo;
        self.updated_at = now;
    }

    fn id(&self) -> &UserId {
        &self.id
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}
