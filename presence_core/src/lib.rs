//! # Presence Core
//!
//! The engine of the presence system. It reads the types from
//! `presence_rules` and turns them into presentation decisions.
//!
//! ## Core Components
//!
//! - **resolver**: maps a context to a `ResolvedDimension` (scale, visibility,
//!   density, motion, interactability)
//! - **composer**: turns a resolved dimension and a content tree into a
//!   renderer-ready `PageComposition`
//! - **cache**: caller-owned memoization of resolution results
//! - **collector**: aggregates live interactions and triggers into activity metrics
//!
//! ## Design Philosophy
//!
//! - **Pure core**: resolution and composition are total functions of their arguments
//! - **Stateful shell**: tracking and caching live in objects the caller owns
//! - **Data-driven**: every threshold is a rule with a default, never a constant in code

pub mod cache;
pub mod collector;
pub mod composer;
pub mod resolver;

pub use cache::*;
pub use collector::*;
pub use composer::*;
pub use resolver::*;
