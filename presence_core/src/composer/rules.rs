//! Tunables for page composition.

use presence_rules::Density;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sections a page can carry, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Primary,
    Metrics,
    Actions,
    History,
}

impl SectionId {
    pub const ALL: [SectionId; 4] = [
        SectionId::Primary,
        SectionId::Metrics,
        SectionId::Actions,
        SectionId::History,
    ];

    pub fn priority(self) -> u8 {
        self as u8
    }
}

/// Child-count range mapped to a column count. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub min: usize,
    pub max: usize,
    pub columns: u32,
}

impl ColumnRange {
    pub const fn new(min: usize, max: usize, columns: u32) -> Self {
        Self { min, max, columns }
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// Sections visible at each density tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionTable {
    pub minimal: BTreeSet<SectionId>,
    pub compact: BTreeSet<SectionId>,
    pub standard: BTreeSet<SectionId>,
    pub expanded: BTreeSet<SectionId>,
    pub full: BTreeSet<SectionId>,
}

impl Default for SectionTable {
    fn default() -> Self {
        use SectionId::*;
        Self {
            minimal: [Primary].into(),
            compact: [Primary, Metrics].into(),
            standard: [Primary, Metrics, Actions].into(),
            expanded: [Primary, Metrics, Actions, History].into(),
            full: [Primary, Metrics, Actions, History].into(),
        }
    }
}

impl SectionTable {
    pub fn get(&self, density: Density) -> &BTreeSet<SectionId> {
        match density {
            Density::Minimal => &self.minimal,
            Density::Compact => &self.compact,
            Density::Standard => &self.standard,
            Density::Expanded => &self.expanded,
            Density::Full => &self.full,
        }
    }

    /// Every tier shows at least what the tier below it shows.
    pub fn is_monotonic(&self) -> bool {
        Density::ALL
            .windows(2)
            .all(|pair| self.get(pair[1]).is_superset(self.get(pair[0])))
    }
}

/// How a child's own state modulates the dimension it inherits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemModifiers {
    pub active_scale: f64,
    pub locked_scale: f64,
    pub focused_scale: f64,
    pub locked_visibility: f64,
}

impl Default for ItemModifiers {
    fn default() -> Self {
        Self {
            active_scale: 1.1,
            locked_scale: 0.8,
            focused_scale: 1.15,
            locked_visibility: 0.6,
        }
    }
}

/// Composition tunables. Every field has a working default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionRules {
    /// Ordered, non-overlapping ranges. Counts past the last range use its
    /// column count.
    pub column_table: Vec<ColumnRange>,
    /// Vertical children switch from list to grid above this count.
    pub list_grid_threshold: usize,
    pub orbit_base_radius: f64,
    pub orbit_radius_step: f64,
    pub quick_link_limit: usize,
    /// Detail level at which the actions section may appear.
    pub actions_detail_threshold: u8,
    pub sections: SectionTable,
    pub item_modifiers: ItemModifiers,
    pub metric_columns: u32,
    pub hub_max_width: u32,
    pub sidebar_max_width: u32,
}

impl Default for CompositionRules {
    fn default() -> Self {
        Self {
            column_table: vec![
                ColumnRange::new(0, 1, 1),
                ColumnRange::new(2, 4, 2),
                ColumnRange::new(5, 8, 3),
                ColumnRange::new(9, 12, 4),
                ColumnRange::new(13, 999, 5),
            ],
            list_grid_threshold: 12,
            orbit_base_radius: 120.0,
            orbit_radius_step: 40.0,
            quick_link_limit: 5,
            actions_detail_threshold: 3,
            sections: SectionTable::default(),
            item_modifiers: ItemModifiers::default(),
            metric_columns: 4,
            hub_max_width: 1200,
            sidebar_max_width: 1440,
        }
    }
}

impl CompositionRules {
    /// Column count for a child count.
    pub fn columns_for(&self, count: usize) -> u32 {
        if let Some(range) = self.column_table.iter().find(|r| r.contains(count)) {
            return range.columns;
        }
        // Outside every range: above the table uses the last entry, anything
        // else (gaps, empty table) collapses to the widest range not above it.
        self.column_table
            .iter()
            .filter(|r| r.max < count)
            .map(|r| r.columns)
            .max()
            .unwrap_or(1)
    }
}
