//! `GroupRegistry` — group ownership and the agent → group reverse map.
//!
//! # Invariants
//!
//! - Every tracked agent is a member of exactly one group, and
//!   `membership[agent]` names that group.
//! - Groups are created lazily on first need.
//! - A group that loses its last member is dropped, unless its compartment is
//!   persistent (Susceptible, Infected).  The Recovered group therefore comes
//!   and goes; the other two live from first use to the end of the run.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use sir_core::{AgentId, GroupId};

use crate::{Group, ModelError, ModelResult, SirGroup, SirType};

#[derive(Clone, Debug, Default)]
pub struct GroupRegistry {
    groups:     BTreeMap<GroupId, SirGroup>,
    membership: FxHashMap<AgentId, GroupId>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a never-before-seen agent into `kind`'s group.
    ///
    /// # Errors
    ///
    /// [`ModelError::AlreadyAssigned`] if the agent is already tracked.
    pub fn assign(&mut self, agent: AgentId, kind: SirType) -> ModelResult<()> {
        if self.membership.contains_key(&agent) {
            return Err(ModelError::AlreadyAssigned(agent));
        }
        self.group_entry(kind).add_member(agent);
        self.membership.insert(agent, kind.group_id());
        Ok(())
    }

    /// Move a tracked agent into group `target` and return the compartment it
    /// left.  Moving an agent into the group it is already in changes nothing.
    ///
    /// # Errors
    ///
    /// - [`ModelError::InvalidGroup`] if `target` is not a compartment ID.
    /// - [`ModelError::UnassignedAgent`] if the agent is not tracked.
    pub fn reassign(&mut self, agent: AgentId, target: GroupId) -> ModelResult<SirType> {
        let to = SirType::from_group_id(target).ok_or(ModelError::InvalidGroup(target))?;
        let from = self.kind_of(agent)?;
        if from == to {
            return Ok(from);
        }
        self.detach(agent, from);
        self.group_entry(to).add_member(agent);
        self.membership.insert(agent, target);
        Ok(from)
    }

    /// Stop tracking `agent` and return the compartment it was in.
    ///
    /// # Errors
    ///
    /// - [`ModelError::UnknownAgent`] if the agent is not tracked.
    /// - [`ModelError::UnassignedAgent`] if the agent is tracked but its group
    ///   does not list it.
    ///
    /// The registry is left unchanged on error.
    pub fn remove(&mut self, agent: AgentId) -> ModelResult<SirType> {
        if !self.membership.contains_key(&agent) {
            return Err(ModelError::UnknownAgent(agent));
        }
        let kind = self.kind_of(agent)?;
        self.detach(agent, kind);
        self.membership.remove(&agent);
        Ok(kind)
    }

    /// The group `agent` belongs to.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnassignedAgent`] if the agent has no group.  For a live
    /// pedestrian this is registry corruption and callers must not continue.
    pub fn group_of(&self, agent: AgentId) -> ModelResult<&SirGroup> {
        self.membership
            .get(&agent)
            .and_then(|id| self.groups.get(id))
            .filter(|g| g.contains(agent))
            .ok_or(ModelError::UnassignedAgent(agent))
    }

    /// Compartment of `agent`.  Same error contract as
    /// [`group_of`](Self::group_of).
    pub fn kind_of(&self, agent: AgentId) -> ModelResult<SirType> {
        self.group_of(agent).map(SirGroup::kind)
    }

    pub fn is_tracked(&self, agent: AgentId) -> bool {
        self.membership.contains_key(&agent)
    }

    /// Number of agents with a group.
    pub fn tracked_agents(&self) -> usize {
        self.membership.len()
    }

    pub fn get(&self, id: GroupId) -> Option<&SirGroup> {
        self.groups.get(&id)
    }

    /// Current size of `kind`'s group; 0 if the group does not exist.
    pub fn size_of(&self, kind: SirType) -> usize {
        self.get(kind.group_id()).map_or(0, |g| g.size())
    }

    /// Every live group, keyed by ID.
    pub fn groups(&self) -> &BTreeMap<GroupId, SirGroup> {
        &self.groups
    }

    #[cfg(test)]
    pub(crate) fn group_mut(&mut self, id: GroupId) -> Option<&mut SirGroup> {
        self.groups.get_mut(&id)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn group_entry(&mut self, kind: SirType) -> &mut SirGroup {
        self.groups
            .entry(kind.group_id())
            .or_insert_with(|| SirGroup::new(kind))
    }

    fn detach(&mut self, agent: AgentId, kind: SirType) {
        let id = kind.group_id();
        let now_empty = match self.groups.get_mut(&id) {
            Some(group) => {
                group.remove_member(agent);
                group.is_empty()
            }
            None => false,
        };
        if now_empty && !kind.is_persistent() {
            self.groups.remove(&id);
        }
    }
}
