//! The persisted registry data model.
//!
//! Serializes to a JSON object with exactly two keys:
//!
//! ```json
//! { "aliases":  { "db": "postgres-1" },
//!   "projects": { "web": ["nginx", "app"] } }
//! ```
//!
//! Map keys serialize in sorted order; project member lists keep their
//! insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Full registry state: alias and project mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryState {
    /// Alias name → container name. Multiple aliases may point at the
    /// same container.
    pub aliases: BTreeMap<String, String>,
    /// Project name → member container names, duplicates disallowed.
    pub projects: BTreeMap<String, Vec<String>>,
}

impl RegistryState {
    /// Inserts or overwrites an alias entry. Last write wins.
    pub fn add_alias(&mut self, alias: impl Into<String>, container: impl Into<String>) {
        let _ = self.aliases.insert(alias.into(), container.into());
    }

    /// Removes an alias. Returns whether it was present; removal of an
    /// absent alias is a no-op, never an error.
    pub fn remove_alias(&mut self, alias: &str) -> bool {
        self.aliases.remove(alias).is_some()
    }

    /// Adds a container to a project, creating the project if needed.
    /// No-op when the container is already a member.
    pub fn add_to_project(&mut self, project: impl Into<String>, container: impl Into<String>) {
        let members = self.projects.entry(project.into()).or_default();
        let container = container.into();
        if !members.contains(&container) {
            members.push(container);
        }
    }

    /// Removes a project and its member list. Returns whether it was
    /// present; removal of an absent project is a no-op.
    pub fn remove_project(&mut self, project: &str) -> bool {
        self.projects.remove(project).is_some()
    }

    /// Returns the container an alias points at, if registered.
    #[must_use]
    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Returns a project's member list, if registered.
    #[must_use]
    pub fn project_members(&self, project: &str) -> Option<&[String]> {
        self.projects.get(project).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_alias_twice_is_idempotent() {
        let mut state = RegistryState::default();
        state.add_alias("db", "postgres-1");
        let once = state.clone();
        state.add_alias("db", "postgres-1");
        assert_eq!(state, once);
    }

    #[test]
    fn add_alias_overwrites_existing_target() {
        let mut state = RegistryState::default();
        state.add_alias("db", "postgres-1");
        state.add_alias("db", "postgres-2");
        assert_eq!(state.alias_target("db"), Some("postgres-2"));
    }

    #[test]
    fn two_aliases_may_share_a_container() {
        let mut state = RegistryState::default();
        state.add_alias("db", "postgres-1");
        state.add_alias("pg", "postgres-1");
        assert_eq!(state.aliases.len(), 2);
    }

    #[test]
    fn remove_absent_alias_is_noop() {
        let mut state = RegistryState::default();
        assert!(!state.remove_alias("missing"));
        assert_eq!(state, RegistryState::default());
    }

    #[test]
    fn add_to_project_deduplicates_members() {
        let mut state = RegistryState::default();
        state.add_to_project("web", "nginx");
        state.add_to_project("web", "nginx");
        assert_eq!(state.project_members("web"), Some(&["nginx".to_string()][..]));
    }

    #[test]
    fn project_members_keep_insertion_order() {
        let mut state = RegistryState::default();
        state.add_to_project("web", "nginx");
        state.add_to_project("web", "app");
        state.add_to_project("web", "cache");
        assert_eq!(
            state.project_members("web"),
            Some(&["nginx".to_string(), "app".to_string(), "cache".to_string()][..])
        );
    }

    #[test]
    fn remove_absent_project_is_noop() {
        let mut state = RegistryState::default();
        assert!(!state.remove_project("missing"));
    }

    #[test]
    fn serializes_with_exact_key_layout() {
        let mut state = RegistryState::default();
        state.add_alias("db", "postgres-1");
        state.add_to_project("web", "nginx");
        let json = serde_json::to_value(&state).expect("state serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "aliases": { "db": "postgres-1" },
                "projects": { "web": ["nginx"] }
            })
        );
    }

    #[test]
    fn rejects_unknown_top_level_keys() {
        let raw = r#"{ "aliases": {}, "projects": {}, "extra": 1 }"#;
        assert!(serde_json::from_str::<RegistryState>(raw).is_err());
    }
}
