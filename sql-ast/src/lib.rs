//! Typed SELECT statements and a visitor-based SQL renderer.
//!
//! Statements are immutable value trees built through the fluent
//! [`SelectBuilder`](build::select::SelectBuilder) and the node factories,
//! then handed to [`render::render`] for the SQL text. Rendering walks the
//! tree depth-first and assembles the clause fragments through a stack of
//! part visitors, so new segment kinds slot in as new sub-visitors.
//!
//! ```
//! use sql_ast::{render::render, build::select::SelectBuilder, table};
//!
//! let employee = table("employee").as_("e");
//! let select = SelectBuilder::new()
//!     .select(vec![employee.column("id").into()])
//!     .from(employee.clone())
//!     .where_clause(employee.column("retired_at").is_null())
//!     .limit(10)
//!     .build();
//!
//! assert_eq!(
//!     render(&select).unwrap(),
//!     "SELECT e.id FROM employee AS e WHERE e.retired_at IS NULL LIMIT 10"
//! );
//! ```

pub mod ast;
pub mod build;
pub mod error;
pub mod render;
mod validate;
pub mod visit;

use crate::ast::expr::Table;

/// Creates an unaliased table reference.
pub fn table(name: impl Into<String>) -> Table {
    Table::new(name)
}
