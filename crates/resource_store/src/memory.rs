//! In-memory resource store implementation.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{normalize_email, Assignment, Project, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    validate, AssignmentFilter, ProjectFilter, ResourceStore, StoreError, StoreResult, UserFilter,
};

/// In-memory resource store backed by per-entity maps.
///
/// This is the logical store for the service. A database-backed
/// implementation would slot in behind [`ResourceStore`] without touching
/// callers.
#[derive(Debug, Default)]
pub struct MemoryResourceStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    projects: Arc<RwLock<HashMap<Uuid, Project>>>,
    assignments: Arc<RwLock<HashMap<Uuid, Assignment>>>,
}

impl MemoryResourceStore {
    /// Creates a new in-memory resource store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> StoreResult<User> {
        validate::validate_user(&user)?;
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StoreError::already_exists("User", user.id.to_string()));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::already_exists("User", user.email.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = normalize_email(email);
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        validate::validate_user(&user)?;
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(StoreError::not_found("User", user.id.to_string()));
        }
        if users.values().any(|u| u.id != user.id && u.email == user.email) {
            return Err(StoreError::already_exists("User", user.email.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self, filter: UserFilter) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users
            .values()
            .filter(|u| {
                let mut matches = true;
                if let Some(role) = filter.role {
                    matches = matches && u.role() == role;
                }
                if let Some(department) = &filter.department {
                    matches = matches && &u.department == department;
                }
                matches
            })
            .cloned()
            .collect();
        result.sort_by_key(|u| (u.created_at, u.id));
        Ok(result)
    }

    // =========================================================================
    // Project operations
    // =========================================================================

    async fn create_project(&self, project: Project) -> StoreResult<Project> {
        validate::validate_project(&project)?;
        {
            let users = self.users.read().await;
            match users.get(&project.manager_id) {
                Some(user) if user.is_manager() => {}
                _ => {
                    return Err(StoreError::not_found(
                        "Manager",
                        project.manager_id.to_string(),
                    ))
                }
            }
        }
        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.id) {
            return Err(StoreError::already_exists(
                "Project",
                project.id.to_string(),
            ));
        }
        projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.get(&id).cloned())
    }

    async fn update_project(&self, project: Project) -> StoreResult<Project> {
        validate::validate_project(&project)?;
        {
            let users = self.users.read().await;
            match users.get(&project.manager_id) {
                Some(user) if user.is_manager() => {}
                _ => {
                    return Err(StoreError::not_found(
                        "Manager",
                        project.manager_id.to_string(),
                    ))
                }
            }
        }
        let mut projects = self.projects.write().await;
        if !projects.contains_key(&project.id) {
            return Err(StoreError::not_found("Project", project.id.to_string()));
        }
        projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn list_projects(&self, filter: ProjectFilter) -> StoreResult<Vec<Project>> {
        let projects = self.projects.read().await;
        let mut result: Vec<Project> = projects
            .values()
            .filter(|p| {
                let mut matches = true;
                if let Some(status) = filter.status {
                    matches = matches && p.status == status;
                }
                if let Some(manager_id) = filter.manager_id {
                    matches = matches && p.manager_id == manager_id;
                }
                matches
            })
            .cloned()
            .collect();
        result.sort_by_key(|p| (p.created_at, p.id));
        Ok(result)
    }

    // =========================================================================
    // Assignment operations
    // =========================================================================

    async fn create_assignment(&self, assignment: Assignment) -> StoreResult<Assignment> {
        validate::validate_assignment(&assignment)?;
        self.check_assignment_references(&assignment).await?;

        // Budget check and insert happen under one guard so racing
        // writers for the same engineer serialize here.
        let mut assignments = self.assignments.write().await;
        if assignments.contains_key(&assignment.id) {
            return Err(StoreError::already_exists(
                "Assignment",
                assignment.id.to_string(),
            ));
        }
        check_allocation_budget(&assignments, &assignment)?;
        assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn get_assignment(&self, id: Uuid) -> StoreResult<Option<Assignment>> {
        let assignments = self.assignments.read().await;
        Ok(assignments.get(&id).cloned())
    }

    async fn update_assignment(&self, assignment: Assignment) -> StoreResult<Assignment> {
        validate::validate_assignment(&assignment)?;
        self.check_assignment_references(&assignment).await?;

        let mut assignments = self.assignments.write().await;
        if !assignments.contains_key(&assignment.id) {
            return Err(StoreError::not_found(
                "Assignment",
                assignment.id.to_string(),
            ));
        }
        check_allocation_budget(&assignments, &assignment)?;
        assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn delete_assignment(&self, id: Uuid) -> StoreResult<()> {
        let mut assignments = self.assignments.write().await;
        if assignments.remove(&id).is_none() {
            return Err(StoreError::not_found("Assignment", id.to_string()));
        }
        Ok(())
    }

    async fn find_assignments(&self, filter: AssignmentFilter) -> StoreResult<Vec<Assignment>> {
        let assignments = self.assignments.read().await;
        let mut result: Vec<Assignment> = assignments
            .values()
            .filter(|a| {
                let mut matches = true;
                if let Some(engineer_id) = filter.engineer_id {
                    matches = matches && a.engineer_id == engineer_id;
                }
                if let Some(project_id) = filter.project_id {
                    matches = matches && a.project_id == project_id;
                }
                if let Some(date) = filter.containing_date {
                    matches = matches && a.contains_date(date);
                }
                matches
            })
            .cloned()
            .collect();
        result.sort_by_key(|a| (a.created_at, a.id));
        Ok(result)
    }
}

impl MemoryResourceStore {
    /// Resolves the engineer and project references and checks the
    /// assignment dates against the project dates.
    async fn check_assignment_references(&self, assignment: &Assignment) -> StoreResult<()> {
        {
            let users = self.users.read().await;
            match users.get(&assignment.engineer_id) {
                Some(user) if user.is_engineer() => {}
                _ => {
                    return Err(StoreError::not_found(
                        "Engineer",
                        assignment.engineer_id.to_string(),
                    ))
                }
            }
        }
        let projects = self.projects.read().await;
        let project = projects
            .get(&assignment.project_id)
            .ok_or_else(|| StoreError::not_found("Project", assignment.project_id.to_string()))?;
        validate::validate_assignment_within_project(assignment, project)
    }
}

/// Rejects the candidate if it would push the engineer's overlapping
/// allocations past the budget. Must run under the assignments write
/// guard.
fn check_allocation_budget(
    assignments: &HashMap<Uuid, Assignment>,
    candidate: &Assignment,
) -> StoreResult<()> {
    let committed = validate::overlapping_allocation(assignments.values(), candidate);
    let total = committed + candidate.allocation_percentage;
    if total > validate::ALLOCATION_BUDGET {
        tracing::debug!(
            engineer_id = %candidate.engineer_id,
            committed,
            requested = candidate.allocation_percentage,
            "rejecting over-allocating assignment write"
        );
        return Err(StoreError::conflict(format!(
            "engineer {} would be at {}% in an overlapping period",
            candidate.engineer_id, total
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use entities::{Role, RoleProfile, Seniority};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_engineer(email: &str) -> User {
        User::new(
            email,
            "hash",
            "Engineer",
            "Engineering",
            RoleProfile::Engineer {
                seniority: Seniority::Mid,
                skills: vec!["Rust".to_string()],
            },
        )
    }

    fn new_manager(email: &str) -> User {
        User::new(email, "hash", "Manager", "Engineering", RoleProfile::Manager)
    }

    fn new_project(manager_id: Uuid) -> Project {
        Project::new(
            "Project",
            "",
            date(2026, 1, 1),
            date(2026, 12, 31),
            vec!["Rust".to_string()],
            2,
            manager_id,
        )
    }

    async fn seeded_store() -> (MemoryResourceStore, User, Project) {
        let store = MemoryResourceStore::new();
        let manager = store.create_user(new_manager("m@x.com")).await.unwrap();
        let engineer = store.create_user(new_engineer("e@x.com")).await.unwrap();
        let project = store.create_project(new_project(manager.id)).await.unwrap();
        (store, engineer, project)
    }

    #[tokio::test]
    async fn test_user_crud() {
        let store = MemoryResourceStore::new();

        let created = store
            .create_user(new_engineer("sarah@x.com"))
            .await
            .unwrap();
        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "sarah@x.com");

        // Email lookup is case-insensitive.
        let by_email = store
            .get_user_by_email(" Sarah@X.com ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);

        // Duplicate email is rejected.
        let duplicate = store.create_user(new_engineer("sarah@x.com")).await;
        assert!(matches!(duplicate, Err(StoreError::AlreadyExists { .. })));

        store.create_user(new_manager("boss@x.com")).await.unwrap();
        let engineers = store
            .list_users(UserFilter {
                role: Some(Role::Engineer),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(engineers.len(), 1);
    }

    #[tokio::test]
    async fn test_project_manager_must_be_a_manager() {
        let store = MemoryResourceStore::new();
        let engineer = store.create_user(new_engineer("e@x.com")).await.unwrap();

        let result = store.create_project(new_project(engineer.id)).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));

        let result = store.create_project(new_project(Uuid::new_v4())).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_assignment_references_must_resolve() {
        let (store, engineer, project) = seeded_store().await;

        let missing_engineer = Assignment::new(
            Uuid::new_v4(),
            project.id,
            50,
            project.start_date,
            project.end_date,
            "Developer",
        );
        assert!(matches!(
            store.create_assignment(missing_engineer).await,
            Err(StoreError::NotFound { entity_type: "Engineer", .. })
        ));

        let missing_project = Assignment::new(
            engineer.id,
            Uuid::new_v4(),
            50,
            project.start_date,
            project.end_date,
            "Developer",
        );
        assert!(matches!(
            store.create_assignment(missing_project).await,
            Err(StoreError::NotFound { entity_type: "Project", .. })
        ));

        // A manager cannot be the engineer side of an assignment.
        let manager = store.get_user_by_email("m@x.com").await.unwrap().unwrap();
        let manager_assignment = Assignment::new(
            manager.id,
            project.id,
            50,
            project.start_date,
            project.end_date,
            "Developer",
        );
        assert!(matches!(
            store.create_assignment(manager_assignment).await,
            Err(StoreError::NotFound { entity_type: "Engineer", .. })
        ));
    }

    #[tokio::test]
    async fn test_assignment_dates_must_fall_within_project() {
        let (store, engineer, project) = seeded_store().await;

        // Exactly matching the project range is valid.
        let exact = Assignment::new(
            engineer.id,
            project.id,
            50,
            project.start_date,
            project.end_date,
            "Developer",
        );
        store.create_assignment(exact).await.unwrap();

        // One day before the project starts is not.
        let early = Assignment::new(
            engineer.id,
            project.id,
            10,
            project.start_date.pred_opt().unwrap(),
            project.end_date,
            "Developer",
        );
        assert!(matches!(
            store.create_assignment(early).await,
            Err(StoreError::Validation(_))
        ));

        // One day after the project ends is not.
        let late = Assignment::new(
            engineer.id,
            project.id,
            10,
            project.start_date,
            project.end_date.succ_opt().unwrap(),
            "Developer",
        );
        assert!(matches!(
            store.create_assignment(late).await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_overlapping_allocations_cannot_exceed_budget() {
        let (store, engineer, project) = seeded_store().await;

        let first = Assignment::new(
            engineer.id,
            project.id,
            60,
            date(2026, 1, 1),
            date(2026, 6, 30),
            "Developer",
        );
        store.create_assignment(first).await.unwrap();

        // 60 + 60 over an overlapping period busts the budget.
        let second = Assignment::new(
            engineer.id,
            project.id,
            60,
            date(2026, 6, 1),
            date(2026, 12, 31),
            "Developer",
        );
        assert!(matches!(
            store.create_assignment(second).await,
            Err(StoreError::Conflict(_))
        ));

        // The same allocation in a disjoint period is fine.
        let disjoint = Assignment::new(
            engineer.id,
            project.id,
            60,
            date(2026, 7, 1),
            date(2026, 12, 31),
            "Developer",
        );
        store.create_assignment(disjoint).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_excludes_own_previous_version_from_budget() {
        let (store, engineer, project) = seeded_store().await;

        let assignment = Assignment::new(
            engineer.id,
            project.id,
            80,
            project.start_date,
            project.end_date,
            "Developer",
        );
        let created = store.create_assignment(assignment).await.unwrap();

        // Raising 80 to 90 must not collide with the old 80.
        let mut updated = created.clone();
        updated.allocation_percentage = 90;
        let saved = store.update_assignment(updated).await.unwrap();
        assert_eq!(saved.allocation_percentage, 90);

        // But it still cannot go past the budget alongside others.
        let other = Assignment::new(
            engineer.id,
            project.id,
            10,
            project.start_date,
            project.end_date,
            "Developer",
        );
        store.create_assignment(other).await.unwrap();
        let mut too_much = saved;
        too_much.allocation_percentage = 95;
        assert!(matches!(
            store.update_assignment(too_much).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_racing_writes_serialize_at_the_budget() {
        let (store, engineer, project) = seeded_store().await;
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for _ in 0..5 {
            let store = store.clone();
            let assignment = Assignment::new(
                engineer.id,
                project.id,
                30,
                date(2026, 3, 1),
                date(2026, 3, 31),
                "Developer",
            );
            handles.push(tokio::spawn(async move {
                store.create_assignment(assignment).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        // Three 30% slices fit; the rest must lose with a conflict.
        assert_eq!(successes, 3);

        let committed: u32 = store
            .find_assignments(AssignmentFilter {
                engineer_id: Some(engineer.id),
                containing_date: Some(date(2026, 3, 15)),
                ..Default::default()
            })
            .await
            .unwrap()
            .iter()
            .map(|a| a.allocation_percentage)
            .sum();
        assert!(committed <= 100);
        assert_eq!(committed, 90);
    }

    #[tokio::test]
    async fn test_find_assignments_filters_and_orders() {
        let (store, engineer, project) = seeded_store().await;
        let other = store.create_user(new_engineer("o@x.com")).await.unwrap();

        let a1 = store
            .create_assignment(Assignment::new(
                engineer.id,
                project.id,
                40,
                date(2026, 1, 1),
                date(2026, 3, 31),
                "Developer",
            ))
            .await
            .unwrap();
        let a2 = store
            .create_assignment(Assignment::new(
                engineer.id,
                project.id,
                40,
                date(2026, 5, 1),
                date(2026, 6, 30),
                "Developer",
            ))
            .await
            .unwrap();
        store
            .create_assignment(Assignment::new(
                other.id,
                project.id,
                40,
                date(2026, 1, 1),
                date(2026, 3, 31),
                "Developer",
            ))
            .await
            .unwrap();

        let mine = store
            .find_assignments(AssignmentFilter {
                engineer_id: Some(engineer.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, a1.id);
        assert_eq!(mine[1].id, a2.id);

        let in_february = store
            .find_assignments(AssignmentFilter {
                engineer_id: Some(engineer.id),
                containing_date: Some(date(2026, 2, 15)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(in_february.len(), 1);
        assert_eq!(in_february[0].id, a1.id);
    }
}
