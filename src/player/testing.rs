//! A recording `MediaHandle` for tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use crate::library::TrackSource;

use super::handle::{LoadId, MediaEvent, MediaEventKind, MediaHandle, PlayError, PlayTicket, SubscriptionId};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Load(LoadId, TrackSource),
    Play(PlayTicket),
    Pause,
    SetPosition(f64),
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    loaded: LoadId,
    subscribers: Vec<(SubscriptionId, Sender<MediaEvent>)>,
    next_subscription: u64,
}

/// Clones share state, so a test can keep one and hand another to the controller.
#[derive(Clone, Default)]
pub struct FakeHandle {
    inner: Rc<RefCell<Inner>>,
}

impl FakeHandle {
    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    pub fn loaded(&self) -> LoadId {
        self.inner.borrow().loaded
    }

    pub fn last_ticket(&self) -> Option<PlayTicket> {
        self.inner.borrow().calls.iter().rev().find_map(|c| match c {
            Call::Play(t) => Some(*t),
            _ => None,
        })
    }

    /// Emit `kind` tagged with the currently loaded id.
    pub fn emit(&self, kind: MediaEventKind) {
        let load = self.loaded();
        self.emit_for(load, kind);
    }

    pub fn emit_for(&self, load: LoadId, kind: MediaEventKind) {
        let event = MediaEvent::new(load, kind);
        for (_, tx) in &self.inner.borrow().subscribers {
            let _ = tx.send(event.clone());
        }
    }

    /// Settle the most recent play request.
    pub fn settle(&self, result: Result<(), PlayError>) {
        let ticket = self.last_ticket().expect("no play request to settle");
        self.emit(MediaEventKind::PlaySettled { ticket, result });
    }
}

impl MediaHandle for FakeHandle {
    fn load(&mut self, load: LoadId, source: &TrackSource) {
        let mut inner = self.inner.borrow_mut();
        inner.loaded = load;
        inner.calls.push(Call::Load(load, source.clone()));
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.inner.borrow_mut().calls.push(Call::Play(ticket));
    }

    fn pause(&mut self) {
        self.inner.borrow_mut().calls.push(Call::Pause);
    }

    fn set_position(&mut self, seconds: f64) {
        self.inner.borrow_mut().calls.push(Call::SetPosition(seconds));
    }

    fn subscribe(&mut self, events: Sender<MediaEvent>) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        inner.next_subscription += 1;
        let id = SubscriptionId(inner.next_subscription);
        inner.subscribers.push((id, events));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
    }
}
