//! The verb catalog: every set a player can pick.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{CatalogError, ParseError};
use crate::parser;
use crate::types::VerbSet;

const BUILTIN_CATALOG: &str = include_str!("../data/verbs.txt");

/// Immutable collection of verb sets, in display order.
///
/// Sessions never mutate the catalog; they shuffle their own copy of a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerbCatalog {
    sets: Vec<VerbSet>,
}

impl VerbCatalog {
    /// Build a catalog from sets assembled in code.
    ///
    /// Set names must be unique, and so must the verb keys (canonical
    /// infinitives) within a set: statistics hold one row per key.
    pub fn new(sets: Vec<VerbSet>) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();
        for set in &sets {
            if !names.insert(set.name.as_str()) {
                return Err(CatalogError::DuplicateSet(set.name.clone()));
            }

            let mut keys = HashSet::new();
            if let Some(verb) = set.verbs.iter().find(|verb| !keys.insert(verb.key())) {
                return Err(CatalogError::DuplicateVerb {
                    set: set.name.clone(),
                    key: verb.key().to_string(),
                });
            }
        }

        Ok(Self { sets })
    }

    /// The 20 shipped sets of Norwegian irregular verbs.
    pub fn builtin() -> Result<Self, ParseError> {
        Self::from_text(BUILTIN_CATALOG)
    }

    /// Parse a catalog file. See [`crate::parser`] for the format.
    pub fn from_text(content: &str) -> Result<Self, ParseError> {
        // the parser already rejects duplicate sets and verbs
        parser::parse(content).map(|sets| Self { sets })
    }

    pub fn find(&self, name: &str) -> Option<&VerbSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    pub fn sets(&self) -> &[VerbSet] {
        &self.sets
    }

    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|set| set.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The set the player should practice next: the one with the lowest best
    /// score. Ties go to the set that comes first in the catalog.
    pub fn recommended_set<F>(&self, best_score: F) -> Option<&VerbSet>
    where
        F: Fn(&str) -> f64,
    {
        let mut recommended: Option<(&VerbSet, f64)> = None;

        for set in &self.sets {
            let score = best_score(&set.name);
            match recommended {
                Some((_, lowest)) if score >= lowest => {}
                _ => recommended = Some((set, score)),
            }
        }

        recommended.map(|(set, _)| set)
    }
}
