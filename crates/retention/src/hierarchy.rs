//! Parent links between classification codes. Used to group rows for
//! display; retention is never inherited through this tree.

use std::collections::{HashMap, HashSet};

use crate::model::ClassificationCode;

pub struct ClassificationTree<'a> {
    by_id: HashMap<&'a str, &'a ClassificationCode>,
}

impl<'a> ClassificationTree<'a> {
    pub fn new(codes: &'a [ClassificationCode]) -> Self {
        Self {
            by_id: codes.iter().map(|c| (c.id.as_str(), c)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a ClassificationCode> {
        self.by_id.get(id).copied()
    }

    /// Codes from the root down to `id`. Stops at a dangling parent or a cycle.
    pub fn ancestry(&self, id: &str) -> Vec<&'a ClassificationCode> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.get(id);

        while let Some(code) = current {
            if !seen.insert(code.id.as_str()) {
                log::warn!("classification '{}': parent cycle, stopping walk", code.id);
                break;
            }
            chain.push(code);
            current = code.parent_id.as_deref().and_then(|p| {
                let parent = self.get(p);
                if parent.is_none() && !p.trim().is_empty() {
                    log::warn!("classification '{}': unknown parent '{p}'", code.id);
                }
                parent
            });
        }

        chain.reverse();
        chain
    }

    /// Root code string of `id`'s chain (the code itself when it has no parent).
    pub fn root_code(&self, id: &str) -> Option<String> {
        self.ancestry(id).first().map(|c| c.code.clone())
    }

    /// Clone every code with its `group` filled from the hierarchy.
    pub fn with_groups(&self, codes: &[ClassificationCode]) -> Vec<ClassificationCode> {
        codes
            .iter()
            .map(|c| ClassificationCode {
                group: self.root_code(&c.id),
                ..c.clone()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(id: &str, code: &str, parent: Option<&str>) -> ClassificationCode {
        ClassificationCode {
            id: id.into(),
            code: code.into(),
            description: String::new(),
            parent_id: parent.map(str::to_string),
            active_retention_years: None,
            inactive_retention_years: None,
            final_disposition: None,
            skkaad: None,
            group: None,
        }
    }

    #[test]
    fn root_of_nested_code() {
        let codes = vec![
            code("1", "KP", None),
            code("2", "KP.01", Some("1")),
            code("3", "KP.01.02", Some("2")),
        ];
        let tree = ClassificationTree::new(&codes);
        assert_eq!(tree.root_code("3").as_deref(), Some("KP"));
        let path: Vec<&str> = tree.ancestry("3").iter().map(|c| c.code.as_str()).collect();
        assert_eq!(path, vec!["KP", "KP.01", "KP.01.02"]);
    }

    #[test]
    fn top_level_code_is_its_own_root() {
        let codes = vec![code("1", "KU", None)];
        let tree = ClassificationTree::new(&codes);
        assert_eq!(tree.root_code("1").as_deref(), Some("KU"));
    }

    #[test]
    fn dangling_parent_stops_at_last_known() {
        let codes = vec![code("2", "KP.01", Some("missing"))];
        let tree = ClassificationTree::new(&codes);
        assert_eq!(tree.root_code("2").as_deref(), Some("KP.01"));
    }

    #[test]
    fn cycle_terminates() {
        let codes = vec![code("1", "A", Some("2")), code("2", "B", Some("1"))];
        let tree = ClassificationTree::new(&codes);
        assert_eq!(tree.ancestry("1").len(), 2);
    }

    #[test]
    fn unknown_id_has_no_root() {
        let codes = vec![code("1", "KP", None)];
        let tree = ClassificationTree::new(&codes);
        assert_eq!(tree.root_code("404"), None);
    }

    #[test]
    fn with_groups_fills_every_code() {
        let codes = vec![code("1", "KP", None), code("2", "KP.01", Some("1"))];
        let grouped = ClassificationTree::new(&codes).with_groups(&codes);
        assert!(grouped.iter().all(|c| c.group.as_deref() == Some("KP")));
    }
}
