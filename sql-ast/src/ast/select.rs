//! The SELECT statement and its clause segments.

use crate::ast::common::{JoinKind, OrderDir};
use crate::ast::condition::Condition;
use crate::ast::expr::{Column, Expression, Table};

/// A SELECT statement.
///
/// Children visit in syntactic order: select list, FROM, JOINs, WHERE,
/// ORDER BY fields. `distinct`, `limit` and `offset` are plain properties
/// read when leaving the statement, not child segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    pub select_list: SelectList,
    pub from: Option<From>,
    pub joins: Vec<Join>,
    pub where_clause: Option<Where>,
    pub order_by: Vec<OrderByField>,
    pub distinct: bool,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// The projection. Must not be empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectList {
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct From {
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: Table,
    pub on: Condition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByField {
    pub column: Column,
    pub direction: Option<OrderDir>,
}
