use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::Rule;
use crate::store::SharedState;

/// Repository for declarative response rules. Rules are displayed and
/// toggled by operators; nothing in the core evaluates them against
/// incoming alert records.
#[derive(Clone)]
pub struct RulesRepository {
    state: SharedState,
}

impl RulesRepository {
    /// Create a new rules repository over the shared store.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Insert or replace a rule by id.
    ///
    /// Required fields are checked together so the operator sees every
    /// missing piece at once.
    pub fn upsert(&self, rule: Rule) -> Result<Rule> {
        let mut missing = Vec::new();
        if rule.name.trim().is_empty() {
            missing.push("name".to_string());
        }
        if rule.actions.is_empty() {
            missing.push("actions".to_string());
        }
        if !missing.is_empty() {
            return Err(Error::Validation { missing });
        }

        let mut state = self.state.write().unwrap();
        match state.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule.clone(),
            None => state.rules.push(rule.clone()),
        }
        Ok(rule)
    }

    /// Hard delete. Operator confirmation happens upstream in the UI.
    pub fn remove(&self, id: &Uuid) -> Result<()> {
        let mut state = self.state.write().unwrap();
        let before = state.rules.len();
        state.rules.retain(|r| r.id != *id);
        if state.rules.len() == before {
            return Err(Error::NotFound(format!("rule {}", id)));
        }
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Result<Rule> {
        let state = self.state.read().unwrap();
        state
            .rules
            .iter()
            .find(|r| r.id == *id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("rule {}", id)))
    }

    /// Rules ordered by priority, then name.
    pub fn list(&self) -> Vec<Rule> {
        let state = self.state.read().unwrap();
        let mut rules = state.rules.clone();
        rules.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
        rules
    }

    /// The display toggle.
    pub fn set_enabled(&self, id: &Uuid, enabled: bool) -> Result<Rule> {
        let mut state = self.state.write().unwrap();
        let rule = state
            .rules
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or_else(|| Error::NotFound(format!("rule {}", id)))?;
        rule.enabled = enabled;
        Ok(rule.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResponseAction, TriggerCategory};
    use crate::store::new_shared_state;

    fn sample_rule(name: &str, priority: u8) -> Rule {
        Rule::new(
            name,
            TriggerCategory::PersonDetected,
            "watched person appears in any camera view",
            vec![ResponseAction::Snapshot, ResponseAction::NotifyOperator],
            priority,
        )
    }

    #[test]
    fn upsert_reports_all_missing_fields() {
        let repo = RulesRepository::new(new_shared_state());
        let rule = Rule::new("", TriggerCategory::AreaIntrusion, "", vec![], 1);

        let err = repo.upsert(rule).unwrap_err();
        match err {
            Error::Validation { missing } => {
                assert_eq!(missing, vec!["name".to_string(), "actions".to_string()]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(repo.list().is_empty());
    }

    #[test]
    fn upsert_replaces_by_id() {
        let repo = RulesRepository::new(new_shared_state());
        let rule = repo.upsert(sample_rule("gate watch", 2)).unwrap();

        let mut updated = rule.clone();
        updated.priority = 1;
        updated.actions.push(ResponseAction::SoundAlarm);
        repo.upsert(updated).unwrap();

        let rules = repo.list();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].priority, 1);
        assert_eq!(rules[0].actions.len(), 3);
    }

    #[test]
    fn list_orders_by_priority_then_name() {
        let repo = RulesRepository::new(new_shared_state());
        repo.upsert(sample_rule("b rule", 2)).unwrap();
        repo.upsert(sample_rule("a rule", 2)).unwrap();
        repo.upsert(sample_rule("z rule", 1)).unwrap();

        let names: Vec<_> = repo.list().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["z rule", "a rule", "b rule"]);
    }

    #[test]
    fn remove_and_toggle() {
        let repo = RulesRepository::new(new_shared_state());
        let rule = repo.upsert(sample_rule("gate watch", 1)).unwrap();

        let toggled = repo.set_enabled(&rule.id, false).unwrap();
        assert!(!toggled.enabled);

        repo.remove(&rule.id).unwrap();
        assert!(matches!(repo.remove(&rule.id), Err(Error::NotFound(_))));
        assert!(matches!(repo.get(&rule.id), Err(Error::NotFound(_))));
    }
}
