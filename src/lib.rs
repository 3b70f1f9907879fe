//! reshelf - bulk directory reorganization planning and execution
//!
//! This library plans a new layout for a flat list of discovered files
//! (by modification date, by type category, or by externally supplied
//! metadata), resolves naming conflicts deterministically, and materializes
//! the plan as hard links with dry-run and logging support.

pub mod cli;
pub mod config;
pub mod executor;
pub mod output;
pub mod planner;
pub mod sanitize;
pub mod taxonomy;

pub use config::{CompiledFilters, Config, ConfigError};
pub use executor::{ExecuteOptions, ExecutionReport, Reporter, execute};
pub use planner::{
    LinkType, MetadataRecord, Operation, PlanError, PlanningSession, choose_link_type,
    plan_by_date, plan_by_metadata, plan_by_type,
};
pub use sanitize::sanitize;
pub use taxonomy::Taxonomy;

pub use cli::{Cli, Strategy, run};
