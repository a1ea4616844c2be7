//! Expression segments: tables, columns, bind markers, functions and
//! subselects.

use std::fmt;

use crate::ast::select::Select;

/// A table reference, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub alias: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Aliases the table, e.g. `employee AS e`.
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Creates a column owned by this table.
    pub fn column(&self, name: impl Into<String>) -> Column {
        Column {
            table: self.clone(),
            name: name.into(),
            alias: None,
        }
    }

    /// The alias if aliased, else the name.
    pub fn reference_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A column reference carrying its owning table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub table: Table,
    pub name: String,
    pub alias: Option<String>,
}

impl Column {
    /// Aliases the column, e.g. `name AS n`.
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The alias if aliased, else the name.
    pub fn reference_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A bind parameter placeholder.
///
/// Anonymous markers render as `?`, named markers as `:name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMarker {
    pub name: Option<String>,
}

impl fmt::Display for BindMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, ":{name}"),
            None => write!(f, "?"),
        }
    }
}

/// A function call with ordered argument expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleFunction {
    pub name: String,
    pub args: Vec<Expression>,
}

/// A SELECT statement embedded where an expression is expected.
#[derive(Debug, Clone, PartialEq)]
pub struct Subselect {
    pub select: Box<Select>,
}

/// A raw SQL fragment used verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Just {
    pub sql: String,
}

/// Anything that can stand where a value is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Column(Column),
    BindMarker(BindMarker),
    Function(SimpleFunction),
    Subselect(Subselect),
    Just(Just),
}

impl Expression {
    /// A raw SQL fragment, e.g. `just("1")`.
    pub fn just(sql: impl Into<String>) -> Self {
        Expression::Just(Just { sql: sql.into() })
    }

    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function(SimpleFunction {
            name: name.into(),
            args,
        })
    }

    /// An anonymous bind marker.
    pub fn bind_marker() -> Self {
        Expression::BindMarker(BindMarker { name: None })
    }

    /// A named bind marker, rendered as `:name`.
    pub fn named_bind_marker(name: impl Into<String>) -> Self {
        Expression::BindMarker(BindMarker {
            name: Some(name.into()),
        })
    }

    pub fn subselect(select: Select) -> Self {
        Expression::Subselect(Subselect {
            select: Box::new(select),
        })
    }
}

impl From<Column> for Expression {
    fn from(column: Column) -> Self {
        Expression::Column(column)
    }
}
