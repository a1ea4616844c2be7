//! A type-safe, fluent builder for `Select` statements.

// Zero-sized marker structs track the builder state, so clauses can only be
// added in SQL order at compile time.

use std::marker::PhantomData;

use crate::ast::common::{JoinKind, OrderDir};
use crate::ast::condition::Condition;
use crate::ast::expr::{Column, Expression, Table};
use crate::ast::select::{From, Join, OrderByField, Select, SelectList, Where};

/// The initial state of the builder before any clauses have been added.
#[derive(Debug, Default, Clone)]
pub struct InitialState;

/// The state after the projection has been set.
#[derive(Debug, Default, Clone)]
pub struct SelectState;

/// The state after the `FROM` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct FromState;

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    ast: Select,
    _state: PhantomData<State>,
}

impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            _state: PhantomData,
        }
    }

    /// Sets the projection. This is the entry point for building a select
    /// statement.
    pub fn select(mut self, expressions: Vec<Expression>) -> SelectBuilder<SelectState> {
        self.ast.select_list = SelectList { expressions };
        SelectBuilder {
            ast: self.ast,
            _state: PhantomData,
        }
    }
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectBuilder<SelectState> {
    pub fn distinct(mut self) -> Self {
        self.ast.distinct = true;
        self
    }

    /// Adds a `FROM` clause specifying the primary table.
    pub fn from(mut self, table: Table) -> SelectBuilder<FromState> {
        self.ast.from = Some(From {
            tables: vec![table],
        });
        SelectBuilder {
            ast: self.ast,
            _state: PhantomData,
        }
    }

    /// Finalizes the statement, deriving the `FROM` clause from the owning
    /// tables of the projection columns.
    pub fn build(mut self) -> Select {
        self.ast.from = derive_from(&self.ast.select_list.expressions);
        self.ast
    }
}

impl SelectBuilder<FromState> {
    pub fn distinct(mut self) -> Self {
        self.ast.distinct = true;
        self
    }

    /// Adds another table to the `FROM` clause.
    pub fn from(mut self, table: Table) -> Self {
        if let Some(from) = &mut self.ast.from {
            from.tables.push(table);
        }
        self
    }

    /// Adds a `JOIN` clause to the statement.
    pub fn join(mut self, kind: JoinKind, table: Table, on: Condition) -> Self {
        self.ast.joins.push(Join { kind, table, on });
        self
    }

    /// Adds a `WHERE` clause to the statement.
    pub fn where_clause(mut self, condition: Condition) -> Self {
        self.ast.where_clause = Some(Where { condition });
        self
    }

    /// Adds an `ORDER BY` field to the statement.
    pub fn order_by(mut self, column: Column, direction: Option<OrderDir>) -> Self {
        self.ast.order_by.push(OrderByField { column, direction });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.ast.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.ast.offset = Some(offset);
        self
    }

    /// Finalizes and returns the constructed `Select` statement.
    pub fn build(self) -> Select {
        self.ast
    }
}

/// Collects the owning tables of the projection columns, in order,
/// deduplicated by reference name.
fn derive_from(expressions: &[Expression]) -> Option<From> {
    let mut tables: Vec<Table> = Vec::new();
    for expression in expressions {
        collect_tables(expression, &mut tables);
    }
    if tables.is_empty() {
        None
    } else {
        Some(From { tables })
    }
}

fn collect_tables(expression: &Expression, tables: &mut Vec<Table>) {
    match expression {
        Expression::Column(column) => {
            let known = tables
                .iter()
                .any(|table| table.reference_name() == column.table.reference_name());
            if !known {
                tables.push(column.table.clone());
            }
        }
        Expression::Function(function) => {
            for arg in &function.args {
                collect_tables(arg, tables);
            }
        }
        _ => {}
    }
}
