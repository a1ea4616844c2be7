//! Depth-first traversal over the statement AST.
//!
//! Every segment admits a walk that fires `enter`, walks the children in
//! declared order, then fires `leave`. That pre/post ordering is the only
//! contract renderers may rely on.

use crate::ast::condition::{
    AndCondition, Condition, ConditionGroup, ConstantCondition, Equals, In, IsNull, OrCondition,
};
use crate::ast::expr::{BindMarker, Column, Expression, Just, SimpleFunction, Subselect, Table};
use crate::ast::select::{From, Join, OrderByField, Select, SelectList, Where};

/// Receives `enter`/`leave` events during a walk.
pub trait Visitor {
    fn enter(&mut self, segment: SegmentRef<'_>);
    fn leave(&mut self, segment: SegmentRef<'_>);
}

/// A borrowed view of one concrete segment.
#[derive(Debug, Clone, Copy)]
pub enum SegmentRef<'a> {
    Select(&'a Select),
    SelectList(&'a SelectList),
    From(&'a From),
    Join(&'a Join),
    Where(&'a Where),
    OrderByField(&'a OrderByField),
    Table(&'a Table),
    Column(&'a Column),
    BindMarker(&'a BindMarker),
    Function(&'a SimpleFunction),
    Subselect(&'a Subselect),
    Just(&'a Just),
    IsNull(&'a IsNull),
    Equals(&'a Equals),
    In(&'a In),
    And(&'a AndCondition),
    Or(&'a OrCondition),
    Group(&'a ConditionGroup),
    Constant(&'a ConstantCondition),
}

impl<'a> SegmentRef<'a> {
    /// Static name of the segment kind, for diagnostics.
    pub fn kind(self) -> &'static str {
        match self {
            SegmentRef::Select(_) => "Select",
            SegmentRef::SelectList(_) => "SelectList",
            SegmentRef::From(_) => "From",
            SegmentRef::Join(_) => "Join",
            SegmentRef::Where(_) => "Where",
            SegmentRef::OrderByField(_) => "OrderByField",
            SegmentRef::Table(_) => "Table",
            SegmentRef::Column(_) => "Column",
            SegmentRef::BindMarker(_) => "BindMarker",
            SegmentRef::Function(_) => "Function",
            SegmentRef::Subselect(_) => "Subselect",
            SegmentRef::Just(_) => "Just",
            SegmentRef::IsNull(_) => "IsNull",
            SegmentRef::Equals(_) => "Equals",
            SegmentRef::In(_) => "In",
            SegmentRef::And(_) => "And",
            SegmentRef::Or(_) => "Or",
            SegmentRef::Group(_) => "Group",
            SegmentRef::Constant(_) => "Constant",
        }
    }

    /// Whether this segment can stand where a value is expected.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            SegmentRef::Column(_)
                | SegmentRef::BindMarker(_)
                | SegmentRef::Function(_)
                | SegmentRef::Subselect(_)
                | SegmentRef::Just(_)
        )
    }

    /// Whether this segment is boolean-valued.
    pub fn is_condition(self) -> bool {
        matches!(
            self,
            SegmentRef::IsNull(_)
                | SegmentRef::Equals(_)
                | SegmentRef::In(_)
                | SegmentRef::And(_)
                | SegmentRef::Or(_)
                | SegmentRef::Group(_)
                | SegmentRef::Constant(_)
        )
    }

    pub(crate) fn id(self) -> SegmentId {
        SegmentId {
            addr: self.addr(),
            kind: self.kind(),
        }
    }

    fn addr(self) -> *const () {
        match self {
            SegmentRef::Select(s) => s as *const Select as *const (),
            SegmentRef::SelectList(s) => s as *const SelectList as *const (),
            SegmentRef::From(s) => s as *const From as *const (),
            SegmentRef::Join(s) => s as *const Join as *const (),
            SegmentRef::Where(s) => s as *const Where as *const (),
            SegmentRef::OrderByField(s) => s as *const OrderByField as *const (),
            SegmentRef::Table(s) => s as *const Table as *const (),
            SegmentRef::Column(s) => s as *const Column as *const (),
            SegmentRef::BindMarker(s) => s as *const BindMarker as *const (),
            SegmentRef::Function(s) => s as *const SimpleFunction as *const (),
            SegmentRef::Subselect(s) => s as *const Subselect as *const (),
            SegmentRef::Just(s) => s as *const Just as *const (),
            SegmentRef::IsNull(s) => s as *const IsNull as *const (),
            SegmentRef::Equals(s) => s as *const Equals as *const (),
            SegmentRef::In(s) => s as *const In as *const (),
            SegmentRef::And(s) => s as *const AndCondition as *const (),
            SegmentRef::Or(s) => s as *const OrCondition as *const (),
            SegmentRef::Group(s) => s as *const ConditionGroup as *const (),
            SegmentRef::Constant(s) => s as *const ConstantCondition as *const (),
        }
    }
}

/// Identity of a segment within one walk. The address alone is not enough:
/// a child stored at offset zero shares its parent's address, so the kind
/// tag disambiguates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SegmentId {
    addr: *const (),
    kind: &'static str,
}

/// Any AST node: fires `enter(self)`, walks the children in declared
/// order, then fires `leave(self)`.
pub trait Segment {
    fn walk(&self, visitor: &mut dyn Visitor);
}

impl Segment for Select {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Select(self));
        self.select_list.walk(visitor);
        if let Some(from) = &self.from {
            from.walk(visitor);
        }
        for join in &self.joins {
            join.walk(visitor);
        }
        if let Some(where_clause) = &self.where_clause {
            where_clause.walk(visitor);
        }
        for field in &self.order_by {
            field.walk(visitor);
        }
        visitor.leave(SegmentRef::Select(self));
    }
}

impl Segment for SelectList {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::SelectList(self));
        for expression in &self.expressions {
            expression.walk(visitor);
        }
        visitor.leave(SegmentRef::SelectList(self));
    }
}

impl Segment for From {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::From(self));
        for table in &self.tables {
            table.walk(visitor);
        }
        visitor.leave(SegmentRef::From(self));
    }
}

impl Segment for Join {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Join(self));
        self.table.walk(visitor);
        self.on.walk(visitor);
        visitor.leave(SegmentRef::Join(self));
    }
}

impl Segment for Where {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Where(self));
        self.condition.walk(visitor);
        visitor.leave(SegmentRef::Where(self));
    }
}

impl Segment for OrderByField {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::OrderByField(self));
        self.column.walk(visitor);
        visitor.leave(SegmentRef::OrderByField(self));
    }
}

impl Segment for Table {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Table(self));
        visitor.leave(SegmentRef::Table(self));
    }
}

impl Segment for Column {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Column(self));
        self.table.walk(visitor);
        visitor.leave(SegmentRef::Column(self));
    }
}

// The sums carry no events of their own; the concrete node is the segment.
impl Segment for Expression {
    fn walk(&self, visitor: &mut dyn Visitor) {
        match self {
            Expression::Column(column) => column.walk(visitor),
            Expression::BindMarker(marker) => marker.walk(visitor),
            Expression::Function(function) => function.walk(visitor),
            Expression::Subselect(subselect) => subselect.walk(visitor),
            Expression::Just(just) => just.walk(visitor),
        }
    }
}

impl Segment for BindMarker {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::BindMarker(self));
        visitor.leave(SegmentRef::BindMarker(self));
    }
}

impl Segment for SimpleFunction {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Function(self));
        for arg in &self.args {
            arg.walk(visitor);
        }
        visitor.leave(SegmentRef::Function(self));
    }
}

impl Segment for Subselect {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Subselect(self));
        self.select.walk(visitor);
        visitor.leave(SegmentRef::Subselect(self));
    }
}

impl Segment for Just {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Just(self));
        visitor.leave(SegmentRef::Just(self));
    }
}

impl Segment for Condition {
    fn walk(&self, visitor: &mut dyn Visitor) {
        match self {
            Condition::IsNull(is_null) => is_null.walk(visitor),
            Condition::Equals(equals) => equals.walk(visitor),
            Condition::In(in_condition) => in_condition.walk(visitor),
            Condition::And(and) => and.walk(visitor),
            Condition::Or(or) => or.walk(visitor),
            Condition::Group(group) => group.walk(visitor),
            Condition::Constant(constant) => constant.walk(visitor),
        }
    }
}

impl Segment for IsNull {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::IsNull(self));
        self.expr.walk(visitor);
        visitor.leave(SegmentRef::IsNull(self));
    }
}

impl Segment for Equals {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Equals(self));
        self.left.walk(visitor);
        self.right.walk(visitor);
        visitor.leave(SegmentRef::Equals(self));
    }
}

impl Segment for In {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::In(self));
        self.left.walk(visitor);
        for right in &self.rights {
            right.walk(visitor);
        }
        visitor.leave(SegmentRef::In(self));
    }
}

impl Segment for AndCondition {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::And(self));
        self.left.walk(visitor);
        self.right.walk(visitor);
        visitor.leave(SegmentRef::And(self));
    }
}

impl Segment for OrCondition {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Or(self));
        self.left.walk(visitor);
        self.right.walk(visitor);
        visitor.leave(SegmentRef::Or(self));
    }
}

impl Segment for ConditionGroup {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Group(self));
        self.nested.walk(visitor);
        visitor.leave(SegmentRef::Group(self));
    }
}

impl Segment for ConstantCondition {
    fn walk(&self, visitor: &mut dyn Visitor) {
        visitor.enter(SegmentRef::Constant(self));
        visitor.leave(SegmentRef::Constant(self));
    }
}
