//! The policy store: per-owner directives, karma policies, history, settings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::directive::{DirectiveId, FudgeDirective};
use crate::history::RollHistory;
use crate::karma::{KarmaPolicy, PolicyId};
use crate::owner::OwnerId;

/// Host-side storage the engine consults and updates.
///
/// Directive lists are read and written whole, mirroring how hosts keep
/// them as a single flag per owner. A missing owner is not an error: it
/// reads as an empty list and the engine treats it as "no active
/// directive".
pub trait PolicyStore {
    /// Directives owned by `owner`, in configuration order.
    fn fudge_directives(&self, owner: &OwnerId) -> Vec<FudgeDirective>;

    /// Replace the directive list for `owner`. An empty list clears it.
    fn set_fudge_directives(&mut self, owner: &OwnerId, directives: Vec<FudgeDirective>);

    /// All configured karma policies.
    fn karma_policies(&self) -> Vec<KarmaPolicy>;

    /// Replace the karma policy list.
    fn set_karma_policies(&mut self, policies: Vec<KarmaPolicy>);

    /// Natural-roll history for one user and die size.
    fn roll_history(&self, user: &str, die_sides: u32) -> RollHistory;

    /// Append a natural roll to a user's history.
    fn push_roll_history(&mut self, user: &str, die_sides: u32, value: i32);

    /// Retry budget for the fudge loop. Non-positive means no retries.
    fn max_fudge_attempts(&self) -> i32;

    /// Set the retry budget.
    fn set_max_fudge_attempts(&mut self, attempts: i32);
}

fn default_max_attempts() -> i32 {
    MemoryStore::DEFAULT_MAX_ATTEMPTS
}

/// In-memory reference implementation, serializable so file-backed hosts
/// can persist it as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    directives: HashMap<OwnerId, Vec<FudgeDirective>>,
    #[serde(default)]
    policies: Vec<KarmaPolicy>,
    #[serde(default)]
    histories: HashMap<String, RollHistory>,
    #[serde(default = "default_max_attempts")]
    max_attempts: i32,
    #[serde(skip)]
    writes: u64,
}

impl MemoryStore {
    /// Default retry budget for the fudge loop.
    pub const DEFAULT_MAX_ATTEMPTS: i32 = 10;

    /// Create an empty store with the default retry budget.
    pub fn new() -> Self {
        Self {
            directives: HashMap::new(),
            policies: Vec::new(),
            histories: HashMap::new(),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            writes: 0,
        }
    }

    /// Append a directive to an owner's list.
    pub fn add_fudge_directive(&mut self, owner: &OwnerId, directive: FudgeDirective) {
        let mut list = self.fudge_directives(owner);
        list.push(directive);
        self.set_fudge_directives(owner, list);
    }

    /// Remove a directive by ID. Returns true if one was removed.
    pub fn remove_fudge_directive(&mut self, owner: &OwnerId, id: DirectiveId) -> bool {
        let mut list = self.fudge_directives(owner);
        let before = list.len();
        list.retain(|d| d.id != id);
        let removed = list.len() != before;
        if removed {
            self.set_fudge_directives(owner, list);
        }
        removed
    }

    /// Append a karma policy.
    pub fn add_karma_policy(&mut self, policy: KarmaPolicy) {
        let mut policies = self.karma_policies();
        policies.push(policy);
        self.set_karma_policies(policies);
    }

    /// Remove a karma policy by ID. Returns true if one was removed.
    pub fn remove_karma_policy(&mut self, id: PolicyId) -> bool {
        let mut policies = self.karma_policies();
        let before = policies.len();
        policies.retain(|p| p.id != id);
        let removed = policies.len() != before;
        if removed {
            self.set_karma_policies(policies);
        }
        removed
    }

    /// Every owner with at least one directive, sorted for stable output.
    pub fn owners(&self) -> Vec<OwnerId> {
        let mut owners: Vec<OwnerId> = self.directives.keys().cloned().collect();
        owners.sort_by_key(|o| o.to_string());
        owners
    }

    /// How many mutating calls this store has absorbed. Tests use this to
    /// prove that pass-through paths leave the store untouched.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    fn history_key(user: &str, die_sides: u32) -> String {
        format!("{user}/d{die_sides}")
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyStore for MemoryStore {
    fn fudge_directives(&self, owner: &OwnerId) -> Vec<FudgeDirective> {
        self.directives.get(owner).cloned().unwrap_or_default()
    }

    fn set_fudge_directives(&mut self, owner: &OwnerId, directives: Vec<FudgeDirective>) {
        self.writes += 1;
        if directives.is_empty() {
            self.directives.remove(owner);
        } else {
            self.directives.insert(owner.clone(), directives);
        }
    }

    fn karma_policies(&self) -> Vec<KarmaPolicy> {
        self.policies.clone()
    }

    fn set_karma_policies(&mut self, policies: Vec<KarmaPolicy>) {
        self.writes += 1;
        self.policies = policies;
    }

    fn roll_history(&self, user: &str, die_sides: u32) -> RollHistory {
        self.histories
            .get(&Self::history_key(user, die_sides))
            .cloned()
            .unwrap_or_default()
    }

    fn push_roll_history(&mut self, user: &str, die_sides: u32, value: i32) {
        self.writes += 1;
        self.histories
            .entry(Self::history_key(user, die_sides))
            .or_default()
            .push(value);
    }

    fn max_fudge_attempts(&self) -> i32 {
        self.max_attempts
    }

    fn set_max_fudge_attempts(&mut self, attempts: i32) {
        self.writes += 1;
        self.max_attempts = attempts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::RollKind;
    use crate::operator::FudgeOperator;

    #[test]
    fn missing_owner_reads_as_empty_list() {
        let store = MemoryStore::new();
        let owner = OwnerId::user("nobody");
        assert!(store.fudge_directives(&owner).is_empty());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn directive_round_trip() {
        let mut store = MemoryStore::new();
        let owner = OwnerId::user("alice");
        let directive = FudgeDirective::new(RollKind::Attack, FudgeOperator::AtLeast, 15);
        let id = directive.id;
        store.add_fudge_directive(&owner, directive);

        let list = store.fudge_directives(&owner);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, id);
        assert!(store.remove_fudge_directive(&owner, id));
        assert!(!store.remove_fudge_directive(&owner, id));
        assert!(store.owners().is_empty());
    }

    #[test]
    fn empty_list_clears_owner() {
        let mut store = MemoryStore::new();
        let owner = OwnerId::actor("goblin-3");
        store.add_fudge_directive(
            &owner,
            FudgeDirective::new(RollKind::Skill, FudgeOperator::AtMost, 5),
        );
        assert_eq!(store.owners(), vec![owner.clone()]);
        store.set_fudge_directives(&owner, Vec::new());
        assert!(store.owners().is_empty());
    }

    #[test]
    fn history_accumulates_per_user_and_die() {
        let mut store = MemoryStore::new();
        store.push_roll_history("alice", 20, 3);
        store.push_roll_history("alice", 20, 17);
        store.push_roll_history("alice", 6, 2);
        store.push_roll_history("bob", 20, 9);

        assert_eq!(store.roll_history("alice", 20).len(), 2);
        assert_eq!(store.roll_history("alice", 6).len(), 1);
        assert_eq!(store.roll_history("bob", 20).len(), 1);
        assert!(store.roll_history("carol", 20).is_empty());
    }

    #[test]
    fn write_counter_counts_mutations_only() {
        let mut store = MemoryStore::new();
        let owner = OwnerId::user("alice");
        let _ = store.fudge_directives(&owner);
        let _ = store.karma_policies();
        let _ = store.max_fudge_attempts();
        assert_eq!(store.writes(), 0);

        store.set_max_fudge_attempts(3);
        store.push_roll_history("alice", 20, 11);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn json_round_trip_preserves_everything_but_the_counter() {
        let mut store = MemoryStore::new();
        let owner = OwnerId::user("alice");
        store.add_fudge_directive(
            &owner,
            FudgeDirective::new(RollKind::DeathSave, FudgeOperator::AtLeast, 10),
        );
        store.add_karma_policy(KarmaPolicy::simple("pity", FudgeOperator::AtMost, 5, 2, 10));
        store.push_roll_history("alice", 20, 2);
        store.set_max_fudge_attempts(7);

        let json = serde_json::to_string_pretty(&store).unwrap();
        let back: MemoryStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fudge_directives(&owner).len(), 1);
        assert_eq!(back.karma_policies().len(), 1);
        assert_eq!(back.roll_history("alice", 20).len(), 1);
        assert_eq!(back.max_fudge_attempts(), 7);
        assert_eq!(back.writes(), 0);
    }
}
