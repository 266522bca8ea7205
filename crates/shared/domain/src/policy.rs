//! Authorization policy.
//!
//! A single pure decision function, [`can`], answers whether an actor may
//! perform an operation on a resource. Callers turn a `false` into a
//! permission-denied response; the policy itself never fails.
//!
//! | Resource              | View | Create          | Edit                        | Delete                |
//! |-----------------------|------|-----------------|-----------------------------|-----------------------|
//! | Projects (collection) | any  | admin, manager  | -                           | -                     |
//! | Project               | any  | -               | admin, manager, its manager | admin, its manager    |
//! | Tasks of a project    | any  | admin, manager  | -                           | -                     |
//! | Task                  | any  | -               | admin, manager, assignee    | admin, manager, assignee |
//! | Users (directory)     | any  | admin           | -                           | -                     |
//! | User                  | any  | -               | self                        | -                     |

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::project::Project;
use crate::task::Task;
use crate::user::{User, UserRole};

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Uuid, role: UserRole) -> Self {
        Self { id, role }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}

/// Kind of operation being attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    View,
    Create,
    Edit,
    Delete,
}

/// What the operation targets. Creation targets a collection.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Projects,
    Project(&'a Project),
    /// Tasks belonging to the given project
    Tasks(&'a Project),
    Task(&'a Task),
    Users,
    User(&'a User),
}

/// Decide whether `actor` may perform `operation` on `resource`.
pub fn can(actor: &Actor, operation: Operation, resource: Resource<'_>) -> bool {
    match (operation, resource) {
        (Operation::View, _) => true,

        (Operation::Create, Resource::Projects) => actor.role.coordinates_work(),
        (Operation::Edit, Resource::Project(project)) => {
            actor.role.coordinates_work() || project.is_managed_by(actor.id)
        }
        (Operation::Delete, Resource::Project(project)) => {
            actor.role.is_admin() || project.is_managed_by(actor.id)
        }

        (Operation::Create, Resource::Tasks(_)) => actor.role.coordinates_work(),
        (Operation::Edit | Operation::Delete, Resource::Task(task)) => {
            actor.role.coordinates_work() || task.is_assigned_to(actor.id)
        }

        (Operation::Create, Resource::Users) => actor.role.is_admin(),
        (Operation::Edit, Resource::User(user)) => user.id == actor.id,

        (Operation::Create, Resource::Project(_) | Resource::Task(_) | Resource::User(_))
        | (Operation::Edit | Operation::Delete, Resource::Projects | Resource::Tasks(_) | Resource::Users)
        | (Operation::Delete, Resource::User(_)) => false,
    }
}

/// [`can`], lifted into a result for `?` propagation.
pub fn authorize(actor: &Actor, operation: Operation, resource: Resource<'_>) -> DomainResult<()> {
    if can(actor, operation, resource) {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}
