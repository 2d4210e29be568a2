//! Skill analysis: gap reports, team distribution, and staffing
//! recommendations.
//!
//! All list outputs keep first-encounter order: skills appear in the
//! order projects (or engineers) introduce them, and ranked results use
//! a stable sort so equal scores keep their relative order.

use entities::{ProjectStatus, Seniority, User};
use resource_store::{ProjectFilter, ResourceStore};
use serde::Serialize;
use uuid::Uuid;

use crate::{capacity, resolve, AllocationResult};

/// Weight of skill coverage in a recommendation score. The remaining
/// weight comes from the seniority bonus.
const SKILL_WEIGHT: f64 = 0.7;

/// Coverage of one skill: demand across active projects versus supply
/// across the engineer pool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCoverage {
    /// The skill.
    pub skill: String,
    /// Engineers possessing the skill.
    pub engineer_count: u32,
    /// Active projects requiring the skill.
    pub required_count: u32,
    /// Demand minus supply. Positive means the skill is short.
    pub gap: i32,
}

/// Skill gap report across all active projects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapReport {
    /// Required skills nobody on the team has.
    pub missing_skills: Vec<String>,
    /// Required skills the team has, but in shorter supply than demand.
    pub critical_skills: Vec<String>,
    /// Per-skill coverage rows, one per required skill.
    pub skill_coverage: Vec<SkillCoverage>,
}

/// Analyzes skill gaps across all active projects.
///
/// Demand for a skill is the number of active projects requiring it;
/// supply is the number of engineers possessing it. A skill is missing
/// when nobody has it and critical when somebody has it but demand still
/// exceeds supply. Planning and completed projects contribute nothing.
pub async fn analyze_skill_gaps(store: &impl ResourceStore) -> AllocationResult<SkillGapReport> {
    let projects = store
        .list_projects(ProjectFilter {
            status: Some(ProjectStatus::Active),
            ..Default::default()
        })
        .await?;
    let engineers = resolve::engineers(store).await?;

    let mut coverage: Vec<SkillCoverage> = Vec::new();
    for project in &projects {
        for skill in &project.required_skills {
            match coverage.iter_mut().find(|c| &c.skill == skill) {
                Some(entry) => entry.required_count += 1,
                None => coverage.push(SkillCoverage {
                    skill: skill.clone(),
                    engineer_count: 0,
                    required_count: 1,
                    gap: 0,
                }),
            }
        }
    }

    for entry in &mut coverage {
        entry.engineer_count = engineers
            .iter()
            .filter(|e| e.has_skill(&entry.skill))
            .count() as u32;
        entry.gap = entry.required_count as i32 - entry.engineer_count as i32;
    }

    let missing_skills = coverage
        .iter()
        .filter(|c| c.engineer_count == 0)
        .map(|c| c.skill.clone())
        .collect();
    let critical_skills = coverage
        .iter()
        .filter(|c| c.gap > 0 && c.engineer_count > 0)
        .map(|c| c.skill.clone())
        .collect();

    Ok(SkillGapReport {
        missing_skills,
        critical_skills,
        skill_coverage: coverage,
    })
}

/// One engineer's entry under a skill in the team distribution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEngineer {
    /// Display name.
    pub name: String,
    /// Seniority level.
    pub seniority: Seniority,
    /// The engineer's capacity budget.
    pub availability: u32,
}

/// Which engineers hold a skill.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDistribution {
    /// The skill.
    pub skill: String,
    /// How many engineers hold it.
    pub engineer_count: u32,
    /// The engineers holding it.
    pub engineers: Vec<SkillEngineer>,
}

/// Maps every skill anyone on the team has to the engineers holding it.
pub async fn team_skill_distribution(
    store: &impl ResourceStore,
) -> AllocationResult<Vec<SkillDistribution>> {
    let engineers = resolve::engineers(store).await?;

    let mut distribution: Vec<SkillDistribution> = Vec::new();
    for engineer in &engineers {
        let Some(seniority) = engineer.seniority() else {
            continue;
        };
        for skill in engineer.skills() {
            let idx = match distribution.iter().position(|d| &d.skill == skill) {
                Some(idx) => idx,
                None => {
                    distribution.push(SkillDistribution {
                        skill: skill.clone(),
                        engineer_count: 0,
                        engineers: Vec::new(),
                    });
                    distribution.len() - 1
                }
            };
            let entry = &mut distribution[idx];
            entry.engineer_count += 1;
            entry.engineers.push(SkillEngineer {
                name: engineer.name.clone(),
                seniority,
                availability: engineer.max_capacity(),
            });
        }
    }
    Ok(distribution)
}

/// A ranked staffing recommendation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEngineer {
    /// The engineer being recommended.
    pub engineer: User,
    /// Required skills the engineer has.
    pub matching_skills: Vec<String>,
    /// Required skills the engineer lacks.
    pub missing_skills: Vec<String>,
    /// The engineer's capacity budget.
    pub availability: u32,
    /// Weighted skill coverage plus the seniority bonus.
    pub score: f64,
}

fn seniority_bonus(seniority: Seniority) -> f64 {
    match seniority {
        Seniority::Senior => 0.3,
        Seniority::Mid => 0.2,
        Seniority::Junior => 0.1,
    }
}

/// Ranks every engineer against a required skill list, best match first.
///
/// The score is the matched fraction of the required skills, weighted at
/// 0.7, plus a seniority bonus of 0.3, 0.2, or 0.1. An empty skill list
/// contributes a zero skill term rather than poisoning the score, so the
/// ranking degrades to seniority order.
pub async fn recommended_engineers(
    store: &impl ResourceStore,
    required_skills: &[String],
) -> AllocationResult<Vec<RankedEngineer>> {
    let engineers = resolve::engineers(store).await?;

    let mut recommendations: Vec<RankedEngineer> = engineers
        .into_iter()
        .map(|engineer| {
            let matching_skills: Vec<String> = required_skills
                .iter()
                .filter(|skill| engineer.has_skill(skill))
                .cloned()
                .collect();
            let missing_skills: Vec<String> = required_skills
                .iter()
                .filter(|skill| !engineer.has_skill(skill))
                .cloned()
                .collect();

            let skill_score = if required_skills.is_empty() {
                0.0
            } else {
                (matching_skills.len() as f64 / required_skills.len() as f64) * SKILL_WEIGHT
            };
            let bonus = seniority_bonus(engineer.seniority().unwrap_or(Seniority::Junior));
            let availability = engineer.max_capacity();

            RankedEngineer {
                engineer,
                matching_skills,
                missing_skills,
                availability,
                score: skill_score + bonus,
            }
        })
        .collect();

    // Stable: equal scores keep their relative order.
    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(recommendations)
}

/// Ranks every engineer against a project's required skills.
pub async fn recommended_engineers_for_project(
    store: &impl ResourceStore,
    project_id: Uuid,
) -> AllocationResult<Vec<RankedEngineer>> {
    let project = resolve::project(store, project_id).await?;
    recommended_engineers(store, &project.required_skills).await
}

/// An engineer able to take work on a project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuitableEngineer {
    /// The engineer.
    pub engineer: User,
    /// Capacity left at the project's start date.
    pub available_capacity: i32,
}

/// Finds engineers sharing at least one required skill with the project
/// whose capacity at the project's start date is at least
/// `min_availability`.
pub async fn suitable_engineers(
    store: &impl ResourceStore,
    project_id: Uuid,
    min_availability: i32,
) -> AllocationResult<Vec<SuitableEngineer>> {
    let project = resolve::project(store, project_id).await?;
    let engineers = resolve::engineers(store).await?;

    let mut result = Vec::new();
    for engineer in engineers {
        let has_required_skill = project
            .required_skills
            .iter()
            .any(|skill| engineer.has_skill(skill));
        if !has_required_skill {
            continue;
        }
        let available =
            capacity::available_capacity(store, engineer.id, Some(project.start_date)).await?;
        if available >= min_availability {
            result.push(SuitableEngineer {
                engineer,
                available_capacity: available,
            });
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use entities::{Assignment, Project, ProjectStatus, RoleProfile, User};
    use resource_store::MemoryResourceStore;

    use super::*;
    use crate::AllocationError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engineer(email: &str, name: &str, seniority: Seniority, skills: &[&str]) -> User {
        User::new(
            email,
            "h",
            name,
            "Engineering",
            RoleProfile::Engineer {
                seniority,
                skills: skills.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    fn project(name: &str, skills: &[&str], manager_id: Uuid) -> Project {
        Project::new(
            name,
            "",
            date(2026, 1, 1),
            date(2026, 12, 31),
            skills.iter().map(|s| s.to_string()).collect(),
            2,
            manager_id,
        )
    }

    async fn store_with_manager() -> (MemoryResourceStore, User) {
        let store = MemoryResourceStore::new();
        let manager = store
            .create_user(User::new(
                "m@x.com",
                "h",
                "Manager",
                "Engineering",
                RoleProfile::Manager,
            ))
            .await
            .unwrap();
        (store, manager)
    }

    #[tokio::test]
    async fn test_gap_analysis_separates_missing_from_critical() {
        let (store, manager) = store_with_manager().await;
        store
            .create_user(engineer("a@x.com", "A", Seniority::Mid, &["Rust"]))
            .await
            .unwrap();

        // Three active projects require Rust, one requires COBOL too.
        for name in ["P1", "P2"] {
            store
                .create_project(project(name, &["Rust"], manager.id).with_status(ProjectStatus::Active))
                .await
                .unwrap();
        }
        store
            .create_project(
                project("P3", &["Rust", "COBOL"], manager.id).with_status(ProjectStatus::Active),
            )
            .await
            .unwrap();
        // Planning projects contribute no demand.
        store
            .create_project(project("Backlog", &["Go"], manager.id))
            .await
            .unwrap();

        let report = analyze_skill_gaps(&store).await.unwrap();

        // One engineer against three demands: short but not missing.
        assert_eq!(report.critical_skills, vec!["Rust".to_string()]);
        assert_eq!(report.missing_skills, vec!["COBOL".to_string()]);
        assert!(!report.skill_coverage.iter().any(|c| c.skill == "Go"));

        let rust = report
            .skill_coverage
            .iter()
            .find(|c| c.skill == "Rust")
            .unwrap();
        assert_eq!(rust.required_count, 3);
        assert_eq!(rust.engineer_count, 1);
        assert_eq!(rust.gap, 2);

        let cobol = report
            .skill_coverage
            .iter()
            .find(|c| c.skill == "COBOL")
            .unwrap();
        assert_eq!(cobol.engineer_count, 0);
        assert_eq!(cobol.gap, 1);
    }

    #[tokio::test]
    async fn test_oversupplied_skill_is_neither_missing_nor_critical() {
        let (store, manager) = store_with_manager().await;
        store
            .create_user(engineer("a@x.com", "A", Seniority::Mid, &["Rust"]))
            .await
            .unwrap();
        store
            .create_user(engineer("b@x.com", "B", Seniority::Mid, &["Rust"]))
            .await
            .unwrap();
        store
            .create_project(project("P", &["Rust"], manager.id).with_status(ProjectStatus::Active))
            .await
            .unwrap();

        let report = analyze_skill_gaps(&store).await.unwrap();
        assert!(report.missing_skills.is_empty());
        assert!(report.critical_skills.is_empty());
        assert_eq!(report.skill_coverage[0].gap, -1);
    }

    #[tokio::test]
    async fn test_distribution_lists_every_holder_per_skill() {
        let (store, _) = store_with_manager().await;
        store
            .create_user(engineer(
                "a@x.com",
                "Alice",
                Seniority::Senior,
                &["Rust", "AWS"],
            ))
            .await
            .unwrap();
        store
            .create_user(engineer("b@x.com", "Bob", Seniority::Junior, &["Rust"]))
            .await
            .unwrap();

        let distribution = team_skill_distribution(&store).await.unwrap();
        assert_eq!(distribution.len(), 2);

        let rust = distribution.iter().find(|d| d.skill == "Rust").unwrap();
        assert_eq!(rust.engineer_count, 2);
        assert_eq!(rust.engineers[0].name, "Alice");
        assert_eq!(rust.engineers[0].availability, 100);
        assert_eq!(rust.engineers[1].name, "Bob");

        let aws = distribution.iter().find(|d| d.skill == "AWS").unwrap();
        assert_eq!(aws.engineer_count, 1);
    }

    #[tokio::test]
    async fn test_recommendations_rank_by_skill_match_then_seniority() {
        let (store, manager) = store_with_manager().await;
        // Creation order: the junior full match first, so ranking cannot
        // be mistaken for insertion order.
        store
            .create_user(engineer(
                "j@x.com",
                "Junior Full",
                Seniority::Junior,
                &["Rust", "AWS"],
            ))
            .await
            .unwrap();
        store
            .create_user(engineer(
                "s@x.com",
                "Senior Half",
                Seniority::Senior,
                &["Rust"],
            ))
            .await
            .unwrap();
        store
            .create_user(engineer("n@x.com", "No Match", Seniority::Senior, &["Go"]))
            .await
            .unwrap();
        let target = store
            .create_project(project("Target", &["Rust", "AWS"], manager.id))
            .await
            .unwrap();

        let ranked = recommended_engineers_for_project(&store, target.id)
            .await
            .unwrap();
        assert_eq!(ranked.len(), 3);

        // Junior with both skills: 0.7 + 0.1. Senior with half: 0.35 + 0.3.
        assert_eq!(ranked[0].engineer.name, "Junior Full");
        assert!((ranked[0].score - 0.8).abs() < 1e-9);
        assert!(ranked[0].missing_skills.is_empty());

        assert_eq!(ranked[1].engineer.name, "Senior Half");
        assert!((ranked[1].score - 0.65).abs() < 1e-9);
        assert_eq!(ranked[1].matching_skills, vec!["Rust".to_string()]);
        assert_eq!(ranked[1].missing_skills, vec!["AWS".to_string()]);

        // No match still appears, carried by the seniority bonus alone.
        assert_eq!(ranked[2].engineer.name, "No Match");
        assert!((ranked[2].score - 0.3).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_equal_scores_keep_creation_order() {
        let (store, _) = store_with_manager().await;
        store
            .create_user(engineer("1@x.com", "First", Seniority::Mid, &["Rust"]))
            .await
            .unwrap();
        store
            .create_user(engineer("2@x.com", "Second", Seniority::Mid, &["Rust"]))
            .await
            .unwrap();

        let skills = vec!["Rust".to_string()];
        let ranked = recommended_engineers(&store, &skills).await.unwrap();
        assert_eq!(ranked[0].engineer.name, "First");
        assert_eq!(ranked[1].engineer.name, "Second");
        assert!((ranked[0].score - ranked[1].score).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_skill_list_scores_on_seniority_alone() {
        let (store, _) = store_with_manager().await;
        store
            .create_user(engineer("a@x.com", "A", Seniority::Senior, &["Rust"]))
            .await
            .unwrap();

        let ranked = recommended_engineers(&store, &[]).await.unwrap();
        assert!(ranked[0].score.is_finite());
        assert!((ranked[0].score - 0.3).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_recommendations_for_unknown_project_fail() {
        let (store, _) = store_with_manager().await;
        let err = recommended_engineers_for_project(&store, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AllocationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_suitable_engineers_filter_by_skill_and_availability() {
        let (store, manager) = store_with_manager().await;
        let busy = store
            .create_user(engineer("busy@x.com", "Busy", Seniority::Mid, &["Rust"]))
            .await
            .unwrap();
        store
            .create_user(engineer("free@x.com", "Free", Seniority::Mid, &["Rust"]))
            .await
            .unwrap();
        store
            .create_user(engineer("other@x.com", "Other", Seniority::Mid, &["Go"]))
            .await
            .unwrap();

        let staffed = store
            .create_project(project("Staffed", &["Rust"], manager.id))
            .await
            .unwrap();
        store
            .create_assignment(Assignment::new(
                busy.id,
                staffed.id,
                80,
                date(2026, 1, 1),
                date(2026, 12, 31),
                "Developer",
            ))
            .await
            .unwrap();

        // Anyone with the skill qualifies at the default threshold.
        let all = suitable_engineers(&store, staffed.id, 0).await.unwrap();
        assert_eq!(all.len(), 2);

        // Raising the bar drops the busy engineer; the unskilled one
        // never appears.
        let available = suitable_engineers(&store, staffed.id, 50).await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].engineer.name, "Free");
        assert_eq!(available[0].available_capacity, 100);
    }

    #[tokio::test]
    async fn test_report_wire_shape_is_camel_case() {
        let (store, manager) = store_with_manager().await;
        store
            .create_user(engineer("a@x.com", "A", Seniority::Mid, &["Rust"]))
            .await
            .unwrap();
        store
            .create_project(project("P", &["Rust", "COBOL"], manager.id).with_status(ProjectStatus::Active))
            .await
            .unwrap();

        let report = analyze_skill_gaps(&store).await.unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("missingSkills").is_some());
        assert!(value.get("criticalSkills").is_some());
        assert!(value["skillCoverage"][0].get("engineerCount").is_some());
        assert!(value["skillCoverage"][0].get("requiredCount").is_some());
    }
}
