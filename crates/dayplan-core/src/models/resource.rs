//! Plan columns.

use serde::{Deserialize, Serialize};

/// Identifiers of the fixed plan columns, in order.
pub const PLAN_IDS: [&str; 4] = ["plan-a", "plan-b", "plan-c", "plan-d"];

/// A plan column on the schedule grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Resource {
    pub id: String,
    pub name: String,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The ordered `Plan A`..`Plan D` columns.
    pub fn default_plans() -> Vec<Resource> {
        PLAN_IDS
            .iter()
            .zip(["Plan A", "Plan B", "Plan C", "Plan D"])
            .map(|(id, name)| Resource::new(*id, name))
            .collect()
    }

    /// Whether `id` names one of the fixed plan columns.
    pub fn is_known(id: &str) -> bool {
        PLAN_IDS.contains(&id)
    }
}
