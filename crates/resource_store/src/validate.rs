//! Write-path validation.
//!
//! Structural checks run by the store before any record is written.
//! Referential checks (does the engineer exist, is it actually an
//! engineer) live in the store itself because they need the maps.

use entities::{Assignment, Project, User};

use crate::{StoreError, StoreResult};

/// The overlap budget for an engineer's concurrent assignments.
pub(crate) const ALLOCATION_BUDGET: u32 = 100;

/// Validates a user record.
pub(crate) fn validate_user(user: &User) -> StoreResult<()> {
    if user.email.is_empty() || !user.email.contains('@') {
        return Err(StoreError::validation("email must be a valid address"));
    }
    if user.name.trim().is_empty() {
        return Err(StoreError::validation("name must not be empty"));
    }
    if user.department.trim().is_empty() {
        return Err(StoreError::validation("department must not be empty"));
    }
    if user.is_engineer() && user.skills().is_empty() {
        return Err(StoreError::validation(
            "engineers must have at least one skill",
        ));
    }
    Ok(())
}

/// Validates a project record.
pub(crate) fn validate_project(project: &Project) -> StoreResult<()> {
    if project.name.trim().is_empty() {
        return Err(StoreError::validation("name must not be empty"));
    }
    if project.end_date <= project.start_date {
        return Err(StoreError::validation("end date must be after start date"));
    }
    if project.required_skills.is_empty() {
        return Err(StoreError::validation("required skills must not be empty"));
    }
    if project.team_size == 0 {
        return Err(StoreError::validation("team size must be at least 1"));
    }
    Ok(())
}

/// Validates an assignment record.
pub(crate) fn validate_assignment(assignment: &Assignment) -> StoreResult<()> {
    if assignment.allocation_percentage > ALLOCATION_BUDGET {
        return Err(StoreError::validation(
            "allocation percentage must be between 0 and 100",
        ));
    }
    if assignment.end_date <= assignment.start_date {
        return Err(StoreError::validation("end date must be after start date"));
    }
    if assignment.role.trim().is_empty() {
        return Err(StoreError::validation("role must not be empty"));
    }
    Ok(())
}

/// Checks that the assignment dates fall within the project dates.
/// Matching the project range exactly is allowed.
pub(crate) fn validate_assignment_within_project(
    assignment: &Assignment,
    project: &Project,
) -> StoreResult<()> {
    if assignment.start_date < project.start_date || assignment.end_date > project.end_date {
        return Err(StoreError::validation(
            "assignment dates must fall within the project dates",
        ));
    }
    Ok(())
}

/// Sums the allocation already committed to the candidate's engineer
/// over periods overlapping the candidate, excluding the candidate's own
/// previous version.
pub(crate) fn overlapping_allocation<'a>(
    existing: impl Iterator<Item = &'a Assignment>,
    candidate: &Assignment,
) -> u32 {
    existing
        .filter(|a| {
            a.id != candidate.id
                && a.engineer_id == candidate.engineer_id
                && a.overlaps(candidate.start_date, candidate.end_date)
        })
        .map(|a| a.allocation_percentage)
        .sum()
}
