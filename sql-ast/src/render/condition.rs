//! Condition rendering. Operand sub-visitors are pushed right-to-left so
//! the natural walk reaches the left operand first; their fragments arrive
//! back in operand order.

use crate::render::expr::expression;
use crate::render::stack::PartVisitor;
use crate::render::subtree::{Descend, SubtreeHandler, SubtreeVisitor};
use crate::visit::SegmentRef;

pub(crate) fn condition() -> Box<dyn PartVisitor> {
    SubtreeVisitor::filtered(ConditionHandler::default())
}

#[derive(Default)]
struct ConditionHandler {
    parts: Vec<String>,
    out: String,
}

impl ConditionHandler {
    fn operand(&self, index: usize) -> &str {
        self.parts.get(index).map_or("", String::as_str)
    }
}

impl SubtreeHandler for ConditionHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool {
        segment.is_condition()
    }

    fn enter_matched(&mut self, segment: SegmentRef<'_>) -> Descend {
        let operands: Vec<Box<dyn PartVisitor>> = match segment {
            SegmentRef::IsNull(_) => vec![expression()],
            SegmentRef::Equals(_) => vec![expression(), expression()],
            SegmentRef::In(in_condition) => {
                let mut subs: Vec<Box<dyn PartVisitor>> = Vec::new();
                for _ in &in_condition.rights {
                    subs.push(expression());
                }
                // The left operand is walked first, so it goes on top.
                subs.push(expression());
                subs
            }
            SegmentRef::And(_) | SegmentRef::Or(_) => vec![condition(), condition()],
            SegmentRef::Group(_) => vec![condition()],
            _ => return Descend::Stay,
        };
        Descend::Push(operands)
    }

    fn leave_matched(&mut self, segment: SegmentRef<'_>) {
        match segment {
            SegmentRef::IsNull(is_null) => {
                let suffix = if is_null.negated {
                    " IS NOT NULL"
                } else {
                    " IS NULL"
                };
                self.out = format!("{}{}", self.operand(0), suffix);
            }
            SegmentRef::Equals(_) => {
                self.out = format!("{} = {}", self.operand(0), self.operand(1));
            }
            SegmentRef::In(_) => {
                let rights = self.parts.get(1..).unwrap_or(&[]).join(", ");
                self.out = format!("{} IN ({})", self.operand(0), rights);
            }
            SegmentRef::And(_) => {
                self.out = format!("{} AND {}", self.operand(0), self.operand(1));
            }
            SegmentRef::Or(_) => {
                self.out = format!("({} OR {})", self.operand(0), self.operand(1));
            }
            SegmentRef::Group(_) => {
                self.out = format!("({})", self.operand(0));
            }
            SegmentRef::Constant(constant) => {
                self.out = constant.sql.clone();
            }
            _ => {}
        }
    }

    fn on_part(&mut self, part: String) {
        self.parts.push(part);
    }

    fn take_part(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}
