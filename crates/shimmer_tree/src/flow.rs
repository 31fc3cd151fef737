//! Skeleton flow notifications
//!
//! A [`FlowObserver`] hears about each top-level operation before its walk
//! starts and after it finishes. Every method defaults to doing nothing.

use crate::tree::NodeId;

/// Hooks around top-level skeleton operations
pub trait FlowObserver {
    fn will_begin_showing_skeletons(&mut self, _root: NodeId) {}

    fn did_show_skeletons(&mut self, _root: NodeId) {}

    fn will_begin_updating_skeletons(&mut self, _root: NodeId) {}

    fn did_update_skeletons(&mut self, _root: NodeId) {}

    fn will_begin_laying_skeletons_if_needed(&mut self, _root: NodeId) {}

    fn did_layout_skeletons(&mut self, _root: NodeId) {}

    fn will_begin_hiding_skeletons(&mut self, _root: NodeId) {}

    fn did_hide_skeletons(&mut self, _root: NodeId) {}
}

/// Kind of flow notification, as recorded by [`FlowLog`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowEvent {
    WillShow(NodeId),
    DidShow(NodeId),
    WillUpdate(NodeId),
    DidUpdate(NodeId),
    WillLayout(NodeId),
    DidLayout(NodeId),
    WillHide(NodeId),
    DidHide(NodeId),
}

/// Observer that appends every notification to a shared log
///
/// Clones share the same log, so keep one clone and hand the other to the
/// engine.
#[derive(Clone, Debug, Default)]
pub struct FlowLog {
    events: std::rc::Rc<std::cell::RefCell<Vec<FlowEvent>>>,
}

impl FlowLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FlowEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: FlowEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl FlowObserver for FlowLog {
    fn will_begin_showing_skeletons(&mut self, root: NodeId) {
        self.push(FlowEvent::WillShow(root));
    }

    fn did_show_skeletons(&mut self, root: NodeId) {
        self.push(FlowEvent::DidShow(root));
    }

    fn will_begin_updating_skeletons(&mut self, root: NodeId) {
        self.push(FlowEvent::WillUpdate(root));
    }

    fn did_update_skeletons(&mut self, root: NodeId) {
        self.push(FlowEvent::DidUpdate(root));
    }

    fn will_begin_laying_skeletons_if_needed(&mut self, root: NodeId) {
        self.push(FlowEvent::WillLayout(root));
    }

    fn did_layout_skeletons(&mut self, root: NodeId) {
        self.push(FlowEvent::DidLayout(root));
    }

    fn will_begin_hiding_skeletons(&mut self, root: NodeId) {
        self.push(FlowEvent::WillHide(root));
    }

    fn did_hide_skeletons(&mut self, root: NodeId) {
        self.push(FlowEvent::DidHide(root));
    }
}
