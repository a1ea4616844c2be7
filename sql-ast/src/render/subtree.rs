//! Reusable subtree traversal templates: *filtered* (handle exactly one
//! matching subtree) and *forwarding* (handle a run of matching sibling
//! subtrees).

use crate::render::stack::{Flow, PartVisitor};
use crate::visit::{SegmentId, SegmentRef};

/// How a handler hook routes the children of the segment it just saw.
pub(crate) enum Descend {
    /// Keep receiving the subtree's events on this visitor.
    Stay,
    /// The given sub-visitors take over the child walk; the current event
    /// is consumed here.
    Push(Vec<Box<dyn PartVisitor>>),
    /// The current event and its whole subtree belong to another visitor.
    Handoff(Box<dyn PartVisitor>),
}

/// Hooks for a visitor driven by [`SubtreeVisitor`].
///
/// *Matched* refers to the root of the subtree the visitor is responsible
/// for, *nested* to its descendants.
pub(crate) trait SubtreeHandler {
    fn matches(&self, segment: SegmentRef<'_>) -> bool;

    fn enter_matched(&mut self, _segment: SegmentRef<'_>) -> Descend {
        Descend::Stay
    }

    fn enter_nested(&mut self, _segment: SegmentRef<'_>) -> Descend {
        Descend::Stay
    }

    fn leave_matched(&mut self, _segment: SegmentRef<'_>) {}

    fn leave_nested(&mut self, _segment: SegmentRef<'_>) {}

    /// Receives the fragment of a sub-visitor this handler pushed.
    fn on_part(&mut self, _part: String) {}

    /// Yields the accumulated fragment.
    fn take_part(&mut self) -> String;
}

enum Mode {
    /// Handle exactly one matching subtree, then pop.
    Single,
    /// Handle matching sibling subtrees until a non-matching event arrives.
    Run,
}

pub(crate) struct SubtreeVisitor<H> {
    handler: H,
    mode: Mode,
    current: Option<SegmentId>,
}

impl<H: SubtreeHandler + 'static> SubtreeVisitor<H> {
    pub(crate) fn filtered(handler: H) -> Box<dyn PartVisitor> {
        Box::new(Self {
            handler,
            mode: Mode::Single,
            current: None,
        })
    }

    pub(crate) fn forwarding(handler: H) -> Box<dyn PartVisitor> {
        Box::new(Self {
            handler,
            mode: Mode::Run,
            current: None,
        })
    }
}

fn flow_of(descend: Descend) -> Flow {
    match descend {
        Descend::Stay => Flow::Stay,
        Descend::Push(subs) => Flow::Delegate(subs),
        Descend::Handoff(sub) => Flow::Handoff(sub),
    }
}

impl<H: SubtreeHandler> PartVisitor for SubtreeVisitor<H> {
    fn enter(&mut self, segment: SegmentRef<'_>) -> Flow {
        if self.current.is_some() {
            return flow_of(self.handler.enter_nested(segment));
        }
        if !self.handler.matches(segment) {
            return Flow::Unhandled;
        }
        match self.handler.enter_matched(segment) {
            // The subtree is handled elsewhere; this visitor stays
            // unmatched and collects the fragment.
            Descend::Handoff(sub) => Flow::Handoff(sub),
            Descend::Stay => {
                self.current = Some(segment.id());
                Flow::Stay
            }
            Descend::Push(subs) => {
                self.current = Some(segment.id());
                Flow::Delegate(subs)
            }
        }
    }

    fn leave(&mut self, segment: SegmentRef<'_>) -> Flow {
        match self.current {
            Some(current) if current == segment.id() => {
                self.handler.leave_matched(segment);
                self.current = None;
                match self.mode {
                    Mode::Single => Flow::Finished,
                    Mode::Run => Flow::Stay,
                }
            }
            Some(_) => {
                self.handler.leave_nested(segment);
                Flow::Stay
            }
            None => Flow::Unhandled,
        }
    }

    fn on_part(&mut self, part: String) {
        self.handler.on_part(part);
    }

    fn take_part(&mut self) -> String {
        self.handler.take_part()
    }
}
