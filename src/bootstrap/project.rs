//! Project ensurer.
//!
//! A project is only ever created. When it already exists the authoritative
//! ID is looked up by name, the name itself is never reconciled.

use super::BootstrapError;
use crate::identity::{ConflictSignals, CreateProject, IdentityService, ResourceKind};
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct ProjectInput<'a> {
    pub organization_id: &'a str,
    pub project_id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredProject {
    pub id: String,
    pub created: bool,
}

pub async fn ensure_project(
    identity: &dyn IdentityService,
    signals: &ConflictSignals,
    input: ProjectInput<'_>,
) -> Result<EnsuredProject, BootstrapError> {
    let fail = |source| BootstrapError::Project {
        name: input.name.to_string(),
        source,
    };

    let request = CreateProject {
        organization_id: input.organization_id.to_string(),
        project_id: input.project_id.to_string(),
        name: input.name.to_string(),
    };

    match identity.create_project(&request).await {
        Ok(project) => {
            info!(project_id = %project.id, name = input.name, "Created project");
            return Ok(EnsuredProject {
                id: project.id,
                created: true,
            });
        }
        Err(err) if signals.is_conflict(ResourceKind::Project, &err) => {
            info!(name = input.name, "Project already exists, resolving its ID");
        }
        Err(err) => return Err(fail(err)),
    }

    let mut matches = identity
        .list_projects(input.organization_id, input.name)
        .await
        .map_err(fail)?;

    let id = match matches.len() {
        0 => {
            // Not visible by name, e.g. renamed by hand; it must exist under the desired ID
            identity
                .get_project(input.project_id)
                .await
                .map_err(fail)?
                .id
        }
        1 => matches.remove(0).id,
        count => {
            return Err(BootstrapError::Ambiguous {
                kind: ResourceKind::Project,
                name: input.name.to_string(),
                count,
            })
        }
    };

    info!(project_id = %id, name = input.name, "Using existing project");
    Ok(EnsuredProject { id, created: false })
}
