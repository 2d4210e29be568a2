//! Project-related entity definitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Not yet started.
    Planning,
    /// Currently running.
    Active,
    /// Finished.
    Completed,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Planning
    }
}

/// A project engineers can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// First day of the project.
    pub start_date: NaiveDate,
    /// Last day of the project, inclusive.
    pub end_date: NaiveDate,
    /// Skills the project requires. Must not be empty.
    pub required_skills: Vec<String>,
    /// Planned head count. Must be at least 1.
    pub team_size: u32,
    /// Current status.
    pub status: ProjectStatus,
    /// The manager who owns this project.
    pub manager_id: Uuid,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project in planning status.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        required_skills: Vec<String>,
        team_size: u32,
        manager_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            start_date,
            end_date,
            required_skills,
            team_size,
            status: ProjectStatus::Planning,
            manager_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns true if the project requires the given skill.
    pub fn requires_skill(&self, skill: &str) -> bool {
        self.required_skills.iter().any(|s| s == skill)
    }

    /// Total capacity the planned team represents, in percentage points.
    pub fn total_capacity(&self) -> u32 {
        self.team_size * 100
    }
}
