//! Assignment-related entity definitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A time-boxed allocation of an engineer to a project.
///
/// Date ranges are inclusive on both ends: an engineer assigned from the
/// 1st to the 31st is allocated on both the 1st and the 31st.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique identifier.
    pub id: Uuid,
    /// The engineer being allocated.
    pub engineer_id: Uuid,
    /// The project receiving the allocation.
    pub project_id: Uuid,
    /// Percentage of the engineer's time, 0 to 100.
    pub allocation_percentage: u32,
    /// First day of the assignment.
    pub start_date: NaiveDate,
    /// Last day of the assignment, inclusive.
    pub end_date: NaiveDate,
    /// Free-text role label, e.g. "Developer" or "Tech Lead".
    pub role: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        engineer_id: Uuid,
        project_id: Uuid,
        allocation_percentage: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        role: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            engineer_id,
            project_id,
            allocation_percentage,
            start_date,
            end_date,
            role: role.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the given day falls within this assignment.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns true if this assignment intersects the given range.
    /// Sharing a single boundary day counts as overlap.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}
