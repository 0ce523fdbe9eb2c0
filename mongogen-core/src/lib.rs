//! A MongoDB shell-script generator driven by structured filter conditions.
//!
//! This crate is the core of the mongogen project and provides:
//!
//! - **Condition model** ([`condition`]) - Condition records, operators, and the ordered set the caller edits
//! - **Value parsing** ([`value`]) - Total conversion of raw value text into typed BSON values
//! - **Filter compilation** ([`filter`]) - Fragment construction and the grouping/merge algorithm
//! - **Canonical rendering** ([`render`]) - Deterministic shell text for compiled filters
//! - **Script assembly** ([`script`]) - `db.<collection>.<operation>(...)` statement templates
//! - **Schema import** ([`schema`]) - Field-path extraction from JSON samples
//! - **Error handling** ([`error`]) - Error and result types for the caller-facing surface
//!
//! # Example
//!
//! ```ignore
//! use mongogen_core::{compile, render, Condition, Operator, GroupOperator, GroupNumber};
//!
//! let conditions = vec![Condition {
//!     field: "status".to_string(),
//!     operator: Operator::Eq,
//!     value: "active".to_string(),
//!     group_number: GroupNumber::One,
//!     group_operator: GroupOperator::None,
//! }];
//!
//! let filter = compile(&conditions);
//! println!("{}", render::render(&filter));
//! ```

pub mod condition;
pub mod error;
pub mod filter;
pub mod render;
pub mod schema;
pub mod script;
pub mod value;

pub use condition::{Condition, ConditionSet, GroupNumber, GroupOperator, Operator};
pub use error::{GeneratorError, GeneratorResult};
pub use filter::compile;
pub use script::{Operation, ScriptRequest, UpdateOperator, generate};
pub use value::parse_value;
