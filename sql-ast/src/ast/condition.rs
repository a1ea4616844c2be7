//! Boolean-valued segments and the factories that build them.

use crate::ast::expr::{Column, Expression};

/// A boolean-valued segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    IsNull(IsNull),
    Equals(Equals),
    In(In),
    And(AndCondition),
    Or(OrCondition),
    Group(ConditionGroup),
    Constant(ConstantCondition),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsNull {
    pub expr: Expression,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Equals {
    pub left: Expression,
    pub right: Expression,
}

/// `left IN (right, ...)`. The right-hand list must not be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct In {
    pub left: Expression,
    pub rights: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AndCondition {
    pub left: Box<Condition>,
    pub right: Box<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrCondition {
    pub left: Box<Condition>,
    pub right: Box<Condition>,
}

/// Parenthesization marker around a nested condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionGroup {
    pub nested: Box<Condition>,
}

/// A raw SQL fragment used verbatim as a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantCondition {
    pub sql: String,
}

impl Condition {
    pub fn and(self, other: Condition) -> Condition {
        Condition::And(AndCondition {
            left: Box::new(self),
            right: Box::new(other),
        })
    }

    pub fn or(self, other: Condition) -> Condition {
        Condition::Or(OrCondition {
            left: Box::new(self),
            right: Box::new(other),
        })
    }

    pub fn group(nested: Condition) -> Condition {
        Condition::Group(ConditionGroup {
            nested: Box::new(nested),
        })
    }

    /// A raw condition fragment, e.g. `just("1 = 1")`.
    pub fn just(sql: impl Into<String>) -> Condition {
        Condition::Constant(ConstantCondition { sql: sql.into() })
    }

    /// Whether this condition combines two sub-conditions (AND/OR).
    pub fn is_multiple(&self) -> bool {
        matches!(self, Condition::And(_) | Condition::Or(_))
    }
}

// Comparison factories on expressions.
impl Expression {
    pub fn is_null(self) -> Condition {
        Condition::IsNull(IsNull {
            expr: self,
            negated: false,
        })
    }

    pub fn is_not_null(self) -> Condition {
        Condition::IsNull(IsNull {
            expr: self,
            negated: true,
        })
    }

    pub fn eq(self, other: impl Into<Expression>) -> Condition {
        Condition::Equals(Equals {
            left: self,
            right: other.into(),
        })
    }

    pub fn in_list(self, rights: Vec<Expression>) -> Condition {
        Condition::In(In { left: self, rights })
    }
}

// Columns are the usual operands; mirror the factories for ergonomics.
impl Column {
    pub fn is_null(self) -> Condition {
        Expression::from(self).is_null()
    }

    pub fn is_not_null(self) -> Condition {
        Expression::from(self).is_not_null()
    }

    pub fn eq(self, other: impl Into<Expression>) -> Condition {
        Expression::from(self).eq(other)
    }

    pub fn in_list(self, rights: Vec<Expression>) -> Condition {
        Expression::from(self).in_list(rights)
    }
}
