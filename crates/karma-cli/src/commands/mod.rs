pub mod config;
pub mod fudge;
pub mod history;
pub mod policy;
pub mod roll;

use karma_core::{FudgeOperator, OwnerId, UserScope};

/// Parse an owner argument like `user:alice` or `actor:goblin-3`.
fn parse_owner(s: &str) -> Result<OwnerId, String> {
    s.parse().map_err(|e: karma_core::CoreError| e.to_string())
}

/// Parse an operator argument, accepting symbols and word forms.
fn parse_operator(s: &str) -> Result<FudgeOperator, String> {
    s.parse().map_err(|e: karma_core::CoreError| e.to_string())
}

/// Build a policy scope from the CLI flags. No flag at all means every
/// player; gamemasters opt in explicitly.
fn scope_from_flags(players: bool, gms: bool, users: Vec<String>) -> UserScope {
    if !players && !gms && users.is_empty() {
        return UserScope::players();
    }
    UserScope {
        all_gms: gms,
        all_players: players,
        users,
    }
}

/// Render a scope for table output.
fn scope_label(scope: &UserScope) -> String {
    let mut parts = Vec::new();
    if scope.all_gms {
        parts.push("gms".to_string());
    }
    if scope.all_players {
        parts.push("players".to_string());
    }
    if !scope.users.is_empty() {
        parts.push(scope.users.join(", "));
    }
    if parts.is_empty() {
        "nobody".to_string()
    } else {
        parts.join(" + ")
    }
}
