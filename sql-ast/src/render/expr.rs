//! Expression rendering for condition operands and other value positions.

use tracing::debug;

use crate::render::condition::condition;
use crate::render::select::select_statement;
use crate::render::stack::PartVisitor;
use crate::render::subtree::{Descend, SubtreeHandler, SubtreeVisitor};
use crate::visit::SegmentRef;

pub(crate) fn expression() -> Box<dyn PartVisitor> {
    SubtreeVisitor::filtered(ExpressionHandler::default())
}

#[derive(Default)]
struct ExpressionHandler {
    value: String,
}

impl SubtreeHandler for ExpressionHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool {
        segment.is_expression()
    }

    fn enter_matched(&mut self, segment: SegmentRef<'_>) -> Descend {
        match segment {
            SegmentRef::Column(column) => {
                self.value = format!(
                    "{}.{}",
                    column.table.reference_name(),
                    column.reference_name()
                );
                Descend::Stay
            }
            SegmentRef::BindMarker(marker) => {
                self.value = marker.to_string();
                Descend::Stay
            }
            SegmentRef::Just(just) => {
                self.value = just.sql.clone();
                Descend::Stay
            }
            // The surrounding context wraps the fragment (e.g. `IN (...)`);
            // no parentheses are added here.
            SegmentRef::Subselect(_) => Descend::Push(vec![select_statement()]),
            _ => Descend::Stay,
        }
    }

    fn enter_nested(&mut self, segment: SegmentRef<'_>) -> Descend {
        // A boolean-valued child renders through the condition machinery.
        if segment.is_condition() {
            return Descend::Handoff(condition());
        }
        Descend::Stay
    }

    fn leave_matched(&mut self, segment: SegmentRef<'_>) {
        if self.value.is_empty() {
            if let SegmentRef::Function(function) = segment {
                debug!(
                    function = %function.name,
                    "function calls have no expression rendering; emitting nothing"
                );
            }
        }
    }

    fn on_part(&mut self, part: String) {
        self.value = part;
    }

    fn take_part(&mut self) -> String {
        std::mem::take(&mut self.value)
    }
}
