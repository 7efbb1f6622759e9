use std::sync::mpsc::Sender;

use crate::player::{MediaEvent, SubscriptionId};

/// Fan-out of media events to every subscriber.
#[derive(Default)]
pub(super) struct Subscribers {
    list: Vec<(SubscriptionId, Sender<MediaEvent>)>,
}

impl Subscribers {
    pub(super) fn add(&mut self, id: SubscriptionId, tx: Sender<MediaEvent>) {
        self.list.push((id, tx));
    }

    pub(super) fn remove(&mut self, id: SubscriptionId) {
        self.list.retain(|(sid, _)| *sid != id);
    }

    /// Send `event` to everyone; receivers that hung up are dropped.
    pub(super) fn broadcast(&mut self, event: MediaEvent) {
        self.list.retain(|(id, tx)| {
            let alive = tx.send(event.clone()).is_ok();
            if !alive {
                tracing::debug!(subscription = id.0, "dropping disconnected subscriber");
            }
            alive
        });
    }

    pub(super) fn len(&self) -> usize {
        self.list.len()
    }
}
