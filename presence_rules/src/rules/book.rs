//! Rule book: engine rules plus domain definitions keyed by domain id.
//!
//! Documents look like this (TOML; JSON uses the same shape):
//!
//! ```toml
//! [engine]
//! promotion_rate = 12.0
//!
//! [[domain]]
//! id = "agents"
//! name = "Agents"
//! type = "collection"
//! visual = { base_shape = "hexagon", color = "#22c55e", growth_axis = "radial" }
//! rules = { size_by_content = true, motion_by_activity = false }
//! ```
//!
//! A domain entry that fails to parse or validate is logged and skipped, so
//! lookups for it fall back to engine defaults. A broken `[engine]` table is
//! an error for the loader.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use super::{DomainDefinition, DomainRules, EngineRules, RulesVersion};
use crate::context::Context;
use crate::error::{Result, RulesError};

/// Immutable-once-loaded rule configuration.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    engine: EngineRules,
    domains: BTreeMap<String, DomainDefinition>,
}

impl RuleBook {
    /// Create a rule book with the given engine rules and no domains.
    pub fn new(engine: EngineRules) -> Self {
        Self {
            engine,
            domains: BTreeMap::new(),
        }
    }

    pub fn engine(&self) -> &EngineRules {
        &self.engine
    }

    pub fn domain(&self, id: &str) -> Option<&DomainDefinition> {
        self.domains.get(id)
    }

    pub fn domain_ids(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Domain rules for an optional domain id. Missing domains yield `None`.
    pub fn domain_rules(&self, id: Option<&str>) -> Option<&DomainRules> {
        id.and_then(|id| self.domains.get(id)).map(|def| &def.rules)
    }

    /// Domain rules matching the context's domain, if any.
    pub fn rules_for(&self, context: &Context) -> Option<&DomainRules> {
        self.domain_rules(context.domain.as_deref())
    }

    /// Validate against this book's engine rules and add a domain, replacing
    /// any previous one with the same id.
    pub fn insert_domain(&mut self, mut definition: DomainDefinition) -> Result<()> {
        definition.validate_against(&self.engine)?;
        definition.rules.version = RulesVersion::fresh();
        self.domains.insert(definition.id.clone(), definition);
        Ok(())
    }

    /// Parse a TOML rule document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: toml::Table = source.parse()?;
        let engine = match table.get("engine") {
            Some(value) => value.clone().try_into::<EngineRules>()?,
            None => EngineRules::default(),
        };
        let entries = match table.get("domain") {
            Some(toml::Value::Array(items)) => items.clone(),
            Some(_) => {
                return Err(RulesError::invalid("domain", "expected an array of tables"));
            }
            None => Vec::new(),
        };
        Self::assemble(engine, entries, |value| {
            value.try_into::<DomainDefinition>().map_err(RulesError::from)
        })
    }

    /// Parse a JSON rule document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(source)?;
        let engine = match value.get("engine") {
            Some(engine) => serde_json::from_value::<EngineRules>(engine.clone())?,
            None => EngineRules::default(),
        };
        let entries = match value.get("domain") {
            Some(serde_json::Value::Array(items)) => items.clone(),
            Some(_) => {
                return Err(RulesError::invalid("domain", "expected an array of objects"));
            }
            None => Vec::new(),
        };
        Self::assemble(engine, entries, parse_json)
    }

    /// Load a rule document from disk, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&source),
            Some("json") => Self::from_json_str(&source),
            other => Err(RulesError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    fn assemble<V>(
        mut engine: EngineRules,
        entries: Vec<V>,
        parse: impl Fn(V) -> Result<DomainDefinition>,
    ) -> Result<Self> {
        engine.validate()?;
        engine.restamp();

        let mut book = Self::new(engine);
        for (index, entry) in entries.into_iter().enumerate() {
            let outcome = parse(entry).and_then(|definition| book.insert_domain(definition));
            if let Err(err) = outcome {
                warn!(index, error = %err, "Skipping invalid domain rules; engine defaults apply");
            }
        }
        debug!(
            domains = book.len(),
            version = %book.engine.version,
            "Rule book loaded"
        );
        Ok(book)
    }
}

fn parse_json<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(RulesError::from)
}
