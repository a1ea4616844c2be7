//! Renderers for the statement shell and the select list.

use crate::render::clauses::{from_clause, join_clause, order_by_clause, where_clause};
use crate::render::stack::PartVisitor;
use crate::render::subtree::{Descend, SubtreeHandler, SubtreeVisitor};
use crate::visit::SegmentRef;

pub(crate) fn select_statement() -> Box<dyn PartVisitor> {
    SubtreeVisitor::filtered(SelectStatementHandler::default())
}

/// Stitches the clause fragments into the final statement. Fragments arrive
/// in completion order, which the clause stack fixes to syntactic order.
#[derive(Default)]
struct SelectStatementHandler {
    parts: Vec<String>,
    out: String,
}

impl SubtreeHandler for SelectStatementHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool {
        matches!(segment, SegmentRef::Select(_))
    }

    fn enter_matched(&mut self, _segment: SegmentRef<'_>) -> Descend {
        // Reverse syntactic order: the clause walked first must end on top.
        Descend::Push(vec![
            order_by_clause(),
            where_clause(),
            join_clause(),
            from_clause(),
            select_list(),
        ])
    }

    fn leave_matched(&mut self, segment: SegmentRef<'_>) {
        let SegmentRef::Select(select) = segment else {
            return;
        };
        self.out.push_str("SELECT ");
        if select.distinct {
            self.out.push_str("DISTINCT ");
        }
        for part in &self.parts {
            self.out.push_str(part);
        }
        if let Some(limit) = select.limit {
            self.out.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = select.offset {
            self.out.push_str(&format!(" OFFSET {offset}"));
        }
    }

    fn on_part(&mut self, part: String) {
        self.parts.push(part);
    }

    fn take_part(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

pub(crate) fn select_list() -> Box<dyn PartVisitor> {
    SubtreeVisitor::filtered(SelectListHandler::default())
}

/// Renders the projection. Columns emit their raw name (aliases via ` AS `);
/// a nested table contributes `reference.` ahead of its column.
#[derive(Default)]
struct SelectListHandler {
    out: String,
    requires_comma: bool,
    pending: String,
}

impl SubtreeHandler for SelectListHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool {
        matches!(segment, SegmentRef::SelectList(_))
    }

    fn enter_nested(&mut self, segment: SegmentRef<'_>) -> Descend {
        if self.requires_comma {
            self.out.push_str(", ");
            self.requires_comma = false;
        }
        match segment {
            SegmentRef::Function(function) => {
                self.out.push_str(&function.name);
                self.out.push('(');
                Descend::Stay
            }
            // A scalar subquery renders through its own statement visitor.
            SegmentRef::Subselect(_) => Descend::Push(vec![select_statement()]),
            _ => Descend::Stay,
        }
    }

    fn leave_nested(&mut self, segment: SegmentRef<'_>) {
        match segment {
            SegmentRef::Table(table) => {
                self.out.push_str(table.reference_name());
                self.out.push('.');
            }
            SegmentRef::Function(_) => {
                self.out.push(')');
                self.requires_comma = true;
            }
            SegmentRef::Column(column) => {
                self.out.push_str(&column.name);
                if let Some(alias) = &column.alias {
                    self.out.push_str(" AS ");
                    self.out.push_str(alias);
                }
                self.requires_comma = true;
            }
            SegmentRef::Just(just) => {
                self.out.push_str(&just.sql);
                self.requires_comma = true;
            }
            SegmentRef::BindMarker(marker) => {
                self.out.push_str(&marker.to_string());
                self.requires_comma = true;
            }
            SegmentRef::Subselect(_) => {
                let pending = std::mem::take(&mut self.pending);
                self.out.push('(');
                self.out.push_str(&pending);
                self.out.push(')');
                self.requires_comma = true;
            }
            _ => {}
        }
    }

    fn on_part(&mut self, part: String) {
        self.pending = part;
    }

    fn take_part(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}
