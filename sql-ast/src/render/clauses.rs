//! Renderers for the FROM, JOIN, WHERE and ORDER BY clauses. Each clause
//! fragment owns its leading keyword and delimiter.

use crate::render::condition::condition;
use crate::render::stack::PartVisitor;
use crate::render::subtree::{Descend, SubtreeHandler, SubtreeVisitor};
use crate::visit::SegmentRef;

pub(crate) fn from_clause() -> Box<dyn PartVisitor> {
    SubtreeVisitor::filtered(FromHandler::default())
}

#[derive(Default)]
struct FromHandler {
    out: String,
}

impl SubtreeHandler for FromHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool {
        matches!(segment, SegmentRef::From(_))
    }

    fn enter_matched(&mut self, _segment: SegmentRef<'_>) -> Descend {
        Descend::Push(vec![from_tables()])
    }

    fn on_part(&mut self, part: String) {
        self.out.push_str(" FROM ");
        self.out.push_str(&part);
    }

    fn take_part(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

fn from_tables() -> Box<dyn PartVisitor> {
    SubtreeVisitor::forwarding(FromTablesHandler::default())
}

#[derive(Default)]
struct FromTablesHandler {
    out: String,
}

impl SubtreeHandler for FromTablesHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool {
        matches!(segment, SegmentRef::Table(_))
    }

    fn leave_matched(&mut self, segment: SegmentRef<'_>) {
        let SegmentRef::Table(table) = segment else {
            return;
        };
        if !self.out.is_empty() {
            self.out.push_str(", ");
        }
        self.out.push_str(&table.name);
        if let Some(alias) = &table.alias {
            self.out.push_str(" AS ");
            self.out.push_str(alias);
        }
    }

    fn take_part(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

pub(crate) fn join_clause() -> Box<dyn PartVisitor> {
    SubtreeVisitor::forwarding(JoinHandler::default())
}

#[derive(Default)]
struct JoinHandler {
    out: String,
    body: String,
}

impl SubtreeHandler for JoinHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool {
        matches!(segment, SegmentRef::Join(_))
    }

    fn enter_matched(&mut self, _segment: SegmentRef<'_>) -> Descend {
        Descend::Push(vec![join_body()])
    }

    fn leave_matched(&mut self, segment: SegmentRef<'_>) {
        let SegmentRef::Join(join) = segment else {
            return;
        };
        let body = std::mem::take(&mut self.body);
        self.out.push(' ');
        self.out.push_str(join.kind.as_str());
        self.out.push(' ');
        self.out.push_str(&body);
    }

    fn on_part(&mut self, part: String) {
        self.body = part;
    }

    fn take_part(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

fn join_body() -> Box<dyn PartVisitor> {
    SubtreeVisitor::forwarding(JoinBodyHandler::default())
}

/// Renders the joined table, then ` ON ` plus the join condition.
#[derive(Default)]
struct JoinBodyHandler {
    out: String,
}

impl SubtreeHandler for JoinBodyHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool {
        matches!(segment, SegmentRef::Table(_)) || segment.is_condition()
    }

    fn enter_matched(&mut self, segment: SegmentRef<'_>) -> Descend {
        if segment.is_condition() {
            Descend::Handoff(condition())
        } else {
            Descend::Stay
        }
    }

    fn leave_matched(&mut self, segment: SegmentRef<'_>) {
        if let SegmentRef::Table(table) = segment {
            self.out.push_str(&table.name);
            if let Some(alias) = &table.alias {
                self.out.push_str(" AS ");
                self.out.push_str(alias);
            }
        }
    }

    fn on_part(&mut self, part: String) {
        self.out.push_str(" ON ");
        self.out.push_str(&part);
    }

    fn take_part(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

pub(crate) fn where_clause() -> Box<dyn PartVisitor> {
    SubtreeVisitor::filtered(WhereHandler::default())
}

#[derive(Default)]
struct WhereHandler {
    out: String,
}

impl SubtreeHandler for WhereHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool {
        matches!(segment, SegmentRef::Where(_))
    }

    fn enter_matched(&mut self, _segment: SegmentRef<'_>) -> Descend {
        Descend::Push(vec![condition()])
    }

    fn on_part(&mut self, part: String) {
        self.out.push_str(" WHERE ");
        self.out.push_str(&part);
    }

    fn take_part(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

pub(crate) fn order_by_clause() -> Box<dyn PartVisitor> {
    SubtreeVisitor::forwarding(OrderByHandler::default())
}

/// Renders the ORDER BY fields; columns contribute their reference name
/// only, never a table qualifier.
#[derive(Default)]
struct OrderByHandler {
    out: String,
    matched_any: bool,
}

impl SubtreeHandler for OrderByHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool {
        matches!(segment, SegmentRef::OrderByField(_))
    }

    fn enter_matched(&mut self, _segment: SegmentRef<'_>) -> Descend {
        if self.matched_any {
            self.out.push_str(", ");
        } else {
            self.out.push_str(" ORDER BY ");
            self.matched_any = true;
        }
        Descend::Stay
    }

    fn leave_nested(&mut self, segment: SegmentRef<'_>) {
        if let SegmentRef::Column(column) = segment {
            self.out.push_str(column.reference_name());
        }
    }

    fn leave_matched(&mut self, segment: SegmentRef<'_>) {
        let SegmentRef::OrderByField(field) = segment else {
            return;
        };
        if let Some(direction) = field.direction {
            self.out.push(' ');
            self.out.push_str(direction.as_str());
        }
    }

    fn take_part(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}
