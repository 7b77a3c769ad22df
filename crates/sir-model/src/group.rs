//! `SirGroup` — one compartment's member set.

use std::collections::BTreeSet;

use sir_core::{AgentId, GroupId};

use crate::{Group, SirType};

/// Capacity of every SIR group: compartments never fill up.
pub const UNLIMITED: usize = usize::MAX;

/// The members of one compartment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SirGroup {
    id:       GroupId,
    kind:     SirType,
    capacity: usize,
    members:  BTreeSet<AgentId>,
}

impl SirGroup {
    pub fn new(kind: SirType) -> Self {
        Self {
            id: kind.group_id(),
            kind,
            capacity: UNLIMITED,
            members: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> SirType {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `false` if the agent was already a member.
    pub(crate) fn add_member(&mut self, agent: AgentId) -> bool {
        self.members.insert(agent)
    }

    /// Returns `true` if the agent was a member.
    pub(crate) fn remove_member(&mut self, agent: AgentId) -> bool {
        self.members.remove(&agent)
    }
}

impl Group for SirGroup {
    fn id(&self) -> GroupId {
        self.id
    }

    fn size(&self) -> usize {
        self.members.len()
    }

    fn contains(&self, agent: AgentId) -> bool {
        self.members.contains(&agent)
    }

    fn members(&self) -> &BTreeSet<AgentId> {
        &self.members
    }
}
