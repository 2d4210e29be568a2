//! Engineer capacity calculation.

use chrono::{NaiveDate, Utc};
use resource_store::{AssignmentFilter, ResourceStore};
use uuid::Uuid;

use crate::{resolve, AllocationResult};

/// Sums the engineer's allocation percentages over assignments whose
/// range contains `date`. Both range ends are inclusive.
pub async fn allocated_capacity(
    store: &impl ResourceStore,
    engineer_id: Uuid,
    date: NaiveDate,
) -> AllocationResult<u32> {
    let assignments = store
        .find_assignments(AssignmentFilter {
            engineer_id: Some(engineer_id),
            containing_date: Some(date),
            ..Default::default()
        })
        .await?;
    Ok(assignments.iter().map(|a| a.allocation_percentage).sum())
}

/// Capacity the engineer has left on the given day, defaulting to today.
///
/// Returns max capacity minus the allocated total, without clamping: an
/// engineer whose capacity budget shrank under existing assignments
/// reports a negative number. Fails with `NotFound` when the id does not
/// resolve to an engineer-role user.
pub async fn available_capacity(
    store: &impl ResourceStore,
    engineer_id: Uuid,
    date: Option<NaiveDate>,
) -> AllocationResult<i32> {
    let engineer = resolve::engineer(store, engineer_id).await?;
    let date = date.unwrap_or_else(today);
    let allocated = allocated_capacity(store, engineer_id, date).await?;
    Ok(engineer.max_capacity() as i32 - allocated as i32)
}

/// The current calendar day.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
