//! Card registry for template lookup.
//!
//! The `CardRegistry` stores every template a match may reference. Lookup
//! goes through an `FxHashMap`; on the wire the registry is a list sorted
//! by id so that snapshots stay byte-stable.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardTemplate, TemplateId};
use crate::core::error::SetupError;

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use duel_kernel::cards::{Attribute, CardRegistry, CardTemplate, TemplateId};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardTemplate::monster(TemplateId::new(1), "Ember Drake", 4, Attribute::Fire, 1500, 1200))
///     .unwrap();
///
/// let found = registry.get(TemplateId::new(1)).unwrap();
/// assert_eq!(found.name, "Ember Drake");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<CardTemplate>", try_from = "Vec<CardTemplate>")]
pub struct CardRegistry {
    templates: FxHashMap<TemplateId, CardTemplate>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a template list, rejecting repeated ids.
    pub fn from_templates<I>(templates: I) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = CardTemplate>,
    {
        let mut registry = CardRegistry::new();
        for template in templates {
            registry.register(template)?;
        }
        Ok(registry)
    }

    /// Register a template.
    pub fn register(&mut self, template: CardTemplate) -> Result<(), SetupError> {
        if self.templates.contains_key(&template.id) {
            return Err(SetupError::DuplicateTemplate(template.id));
        }
        self.templates.insert(template.id, template);
        Ok(())
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: TemplateId) -> Option<&CardTemplate> {
        self.templates.get(&id)
    }

    /// Get a template by ID, or an `UnknownTemplate` error.
    pub fn lookup(&self, id: TemplateId) -> Result<&CardTemplate, SetupError> {
        self.get(id).ok_or(SetupError::UnknownTemplate(id))
    }

    #[must_use]
    pub fn contains(&self, id: TemplateId) -> bool {
        self.templates.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates sorted by id.
    #[must_use]
    pub fn sorted(&self) -> Vec<&CardTemplate> {
        let mut all: Vec<_> = self.templates.values().collect();
        all.sort_by_key(|t| t.id);
        all
    }

    /// Find templates matching a predicate, sorted by id.
    pub fn find<F>(&self, predicate: F) -> Vec<&CardTemplate>
    where
        F: Fn(&CardTemplate) -> bool,
    {
        self.sorted().into_iter().filter(|t| predicate(t)).collect()
    }
}

impl From<CardRegistry> for Vec<CardTemplate> {
    fn from(registry: CardRegistry) -> Self {
        let mut all: Vec<_> = registry.templates.into_values().collect();
        all.sort_by_key(|t| t.id);
        all
    }
}

impl TryFrom<Vec<CardTemplate>> for CardRegistry {
    type Error = SetupError;

    fn try_from(templates: Vec<CardTemplate>) -> Result<Self, Self::Error> {
        CardRegistry::from_templates(templates)
    }
}
