//! Delegating dispatch: a stack of part visitors, each owning one
//! syntactic region of the output.

use tracing::{trace, warn};

use crate::error::RenderError;
use crate::visit::{SegmentRef, Visitor};

/// A visitor responsible for one region of the rendered statement.
pub(crate) trait PartVisitor {
    fn enter(&mut self, segment: SegmentRef<'_>) -> Flow;
    fn leave(&mut self, segment: SegmentRef<'_>) -> Flow;

    /// Receives the fragment of a sub-visitor this visitor pushed.
    fn on_part(&mut self, part: String);

    /// Yields the accumulated fragment when popped.
    fn take_part(&mut self) -> String;
}

/// How the active delegate routed an event.
pub(crate) enum Flow {
    /// Event consumed; the delegate stays active.
    Stay,
    /// Event consumed; the given sub-visitors take over the child walk.
    /// The last one ends up on top of the stack.
    Delegate(Vec<Box<dyn PartVisitor>>),
    /// Push one sub-visitor and replay the event to it.
    Handoff(Box<dyn PartVisitor>),
    /// The delegate is done; pop it, event consumed.
    Finished,
    /// The delegate is done and the event belongs further down; pop it and
    /// replay.
    Unhandled,
}

struct Entry {
    visitor: Box<dyn PartVisitor>,
    /// Stack index of the visitor that pushed this one; the popped fragment
    /// is delivered there. `None` marks the root.
    owner: Option<usize>,
}

/// The dispatch stack. It owns no SQL state of its own; fragments live in
/// the part visitors and flow to their owners on pop.
pub(crate) struct RenderStack {
    entries: Vec<Entry>,
    output: Option<String>,
    error: Option<RenderError>,
}

#[derive(Clone, Copy)]
enum Event {
    Enter,
    Leave,
}

impl Event {
    fn name(self) -> &'static str {
        match self {
            Event::Enter => "enter",
            Event::Leave => "leave",
        }
    }
}

impl RenderStack {
    pub(crate) fn new(root: Box<dyn PartVisitor>) -> Self {
        Self {
            entries: vec![Entry {
                visitor: root,
                owner: None,
            }],
            output: None,
            error: None,
        }
    }

    pub(crate) fn finish(self) -> Result<String, RenderError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.output.ok_or_else(|| {
            RenderError::InvariantViolation(
                "walk ended before the root visitor finished".to_string(),
            )
        })
    }

    fn dispatch(&mut self, segment: SegmentRef<'_>, event: Event) {
        if self.error.is_some() {
            return;
        }
        if self.entries.is_empty() {
            self.fail(RenderError::InvariantViolation(format!(
                "{} event for {} after rendering completed",
                event.name(),
                segment.kind()
            )));
            return;
        }
        loop {
            let Some(top) = self.entries.last_mut() else {
                // The event cascaded past the bottom: nothing knows this
                // segment kind.
                self.fail(RenderError::UnsupportedNode(segment.kind()));
                return;
            };
            let flow = match event {
                Event::Enter => top.visitor.enter(segment),
                Event::Leave => top.visitor.leave(segment),
            };
            match flow {
                Flow::Stay => return,
                Flow::Delegate(subs) => {
                    let owner = self.entries.len() - 1;
                    for sub in subs {
                        self.push(sub, owner);
                    }
                    return;
                }
                Flow::Handoff(sub) => {
                    let owner = self.entries.len() - 1;
                    self.push(sub, owner);
                    // Replay the event to the new top.
                }
                Flow::Finished => {
                    self.pop();
                    return;
                }
                Flow::Unhandled => {
                    self.pop();
                    // Replay the event to the new top.
                }
            }
            if self.error.is_some() {
                return;
            }
        }
    }

    fn push(&mut self, visitor: Box<dyn PartVisitor>, owner: usize) {
        trace!(depth = self.entries.len(), "push part visitor");
        self.entries.push(Entry {
            visitor,
            owner: Some(owner),
        });
    }

    fn pop(&mut self) {
        let Some(mut entry) = self.entries.pop() else {
            return;
        };
        let part = entry.visitor.take_part();
        trace!(depth = self.entries.len(), part_len = part.len(), "pop part visitor");
        match entry.owner {
            Some(index) => match self.entries.get_mut(index) {
                Some(owner) => owner.visitor.on_part(part),
                None => self.fail(RenderError::InvariantViolation(
                    "part visitor popped after its owner".to_string(),
                )),
            },
            None => self.output = Some(part),
        }
    }

    fn fail(&mut self, error: RenderError) {
        warn!(%error, "rendering aborted");
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl Visitor for RenderStack {
    fn enter(&mut self, segment: SegmentRef<'_>) {
        self.dispatch(segment, Event::Enter);
    }

    fn leave(&mut self, segment: SegmentRef<'_>) {
        self.dispatch(segment, Event::Leave);
    }
}
