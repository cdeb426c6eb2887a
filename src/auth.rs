use crate::config::TrainerConfig;
use crate::training::UserId;

/// A guild member as seen by the gateway: who they are and which roles they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user: UserId,
    pub roles: Vec<String>,
}

impl Member {
    pub fn new(user: UserId, roles: Vec<String>) -> Self {
        Self { user, roles }
    }
}

/// The two role ids that grant instructor privileges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorRoles {
    pub manager: String,
    pub teacher: String,
}

impl InstructorRoles {
    pub fn from_config(config: &TrainerConfig) -> Self {
        Self {
            manager: config.manager_role.clone(),
            teacher: config.teacher_role.clone(),
        }
    }
}

/// True iff `member` holds the manager or the teacher role.
pub fn is_instructor(member: &Member, roles: &InstructorRoles) -> bool {
    member
        .roles
        .iter()
        .any(|role| *role == roles.manager || *role == roles.teacher)
}
