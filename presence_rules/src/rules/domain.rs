//! Domain definitions as they appear in rule documents.

use serde::{Deserialize, Serialize};

use super::{DomainRules, EngineRules};
use crate::content::{GrowthAxis, Shape};
use crate::error::{Result, RulesError};

/// Default look of a domain's nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainVisual {
    pub base_shape: Shape,
    pub color: String,
    pub growth_axis: GrowthAxis,
}

/// One content domain: identity, visual defaults, and rule overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub visual: DomainVisual,
    pub rules: DomainRules,
}

impl DomainDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        visual: DomainVisual,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            visual,
            rules: DomainRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: DomainRules) -> Self {
        self.rules = rules;
        self
    }

    /// Check the parts serde cannot, against the built-in engine rules.
    pub fn validate(&self) -> Result<()> {
        self.validate_against(&EngineRules::default())
    }

    /// Check non-empty identity and that the overrides stay sane once merged
    /// onto `engine`.
    pub fn validate_against(&self, engine: &EngineRules) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(RulesError::InvalidDomain {
                domain: self.id.clone(),
                reason: "id must not be empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(RulesError::InvalidDomain {
                domain: self.id.clone(),
                reason: "name must not be empty".to_string(),
            });
        }
        if self.visual.color.trim().is_empty() {
            return Err(RulesError::InvalidDomain {
                domain: self.id.clone(),
                reason: "visual.color must not be empty".to_string(),
            });
        }
        self.rules
            .validate_against(engine)
            .map_err(|err| RulesError::InvalidDomain {
                domain: self.id.clone(),
                reason: err.to_string(),
            })
    }
}
