//! User-related entity definitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full-time engineers work against a 100% capacity budget.
pub const FULL_TIME_CAPACITY: u32 = 100;
/// Part-time engineers work against a 50% capacity budget.
pub const PART_TIME_CAPACITY: u32 = 50;

/// Employment type, which determines an engineer's capacity budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    /// 100% capacity.
    FullTime,
    /// 50% capacity.
    PartTime,
}

impl Default for EmploymentType {
    fn default() -> Self {
        Self::FullTime
    }
}

impl EmploymentType {
    /// Returns the capacity budget for this employment type.
    pub fn max_capacity(&self) -> u32 {
        match self {
            EmploymentType::FullTime => FULL_TIME_CAPACITY,
            EmploymentType::PartTime => PART_TIME_CAPACITY,
        }
    }
}

/// Seniority level of an engineer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    /// Entry level.
    Junior,
    /// Mid level.
    Mid,
    /// Senior level.
    Senior,
}

/// Role discriminant, used in filters and token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// An engineer who can be assigned to projects.
    Engineer,
    /// A manager who owns projects and creates assignments.
    Manager,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Engineer => write!(f, "engineer"),
            Role::Manager => write!(f, "manager"),
        }
    }
}

/// Role-specific profile data.
///
/// Engineers carry a seniority level and a skill set; managers carry
/// neither. The variant tag serializes as the `role` field so the wire
/// shape stays flat when flattened into [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    /// An engineer with a seniority level and skills.
    Engineer {
        /// Seniority level.
        seniority: Seniority,
        /// Skills this engineer possesses.
        skills: Vec<String>,
    },
    /// A manager.
    Manager,
}

impl RoleProfile {
    /// Returns the role discriminant for this profile.
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Engineer { .. } => Role::Engineer,
            RoleProfile::Manager => Role::Manager,
        }
    }
}

/// A user of the system, either an engineer or a manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Email address, stored trimmed and lowercased.
    pub email: String,
    /// Salted password digest. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Department this user belongs to.
    pub department: String,
    /// Employment type, which determines max capacity.
    pub employment_type: EmploymentType,
    /// Role-specific data, flattened into the record.
    #[serde(flatten)]
    pub profile: RoleProfile,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user. The email is trimmed and lowercased.
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        profile: RoleProfile,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email.into()),
            password_hash: password_hash.into(),
            name: name.into(),
            department: department.into(),
            employment_type: EmploymentType::FullTime,
            profile,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the employment type.
    pub fn with_employment_type(mut self, employment_type: EmploymentType) -> Self {
        self.employment_type = employment_type;
        self
    }

    /// Returns this user's role.
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    /// Returns true if this user is an engineer.
    pub fn is_engineer(&self) -> bool {
        self.role() == Role::Engineer
    }

    /// Returns true if this user is a manager.
    pub fn is_manager(&self) -> bool {
        self.role() == Role::Manager
    }

    /// Capacity budget derived from the employment type.
    pub fn max_capacity(&self) -> u32 {
        self.employment_type.max_capacity()
    }

    /// Returns the engineer's skills, or an empty slice for managers.
    pub fn skills(&self) -> &[String] {
        match &self.profile {
            RoleProfile::Engineer { skills, .. } => skills,
            RoleProfile::Manager => &[],
        }
    }

    /// Returns the engineer's seniority, if any.
    pub fn seniority(&self) -> Option<Seniority> {
        match &self.profile {
            RoleProfile::Engineer { seniority, .. } => Some(*seniority),
            RoleProfile::Manager => None,
        }
    }

    /// Returns true if this user possesses the given skill.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills().iter().any(|s| s == skill)
    }
}

/// Normalizes an email address for storage and lookup.
pub fn normalize_email(email: impl AsRef<str>) -> String {
    email.as_ref().trim().to_lowercase()
}
