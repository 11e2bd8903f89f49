use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// Handle the write paths use to emit lifecycle events. Emission is
/// best-effort: a full or closed channel is logged by the caller and never
/// fails the request.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Events emitted by the directory's write paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Facility events
    FacilitySaved {
        facility_id: String,
        created: bool,
    },
    FacilityUpdated(String),
    FacilityDeleted {
        facility_id: String,
        dependents_removed: u64,
    },

    // Amenity events
    AmenityCreated(Uuid),
    AmenityUpdated(Uuid),
    AmenityDeleted(Uuid),

    // Transportation events
    TransportationCreated(Uuid),
    TransportationUpdated(Uuid),
    TransportationDeleted(Uuid),

    // Type registry events
    AmenityTypeCreated(Uuid),
    AmenityTypeUpdated {
        type_id: Uuid,
        references_touched: u64,
    },
    AmenityTypeDeleted(Uuid),
    TransportationTypeCreated(Uuid),
    TransportationTypeUpdated {
        type_id: Uuid,
        references_touched: u64,
    },
    TransportationTypeDeleted(Uuid),
}

/// Creates the channel pair the process wires together at startup.
pub fn create_event_channel(buffer: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(buffer);
    (EventSender::new(tx), rx)
}

/// Drains the event channel, logging everything that happened. Runs as a
/// background task until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::FacilitySaved {
                facility_id,
                created,
            } => {
                info!(facility_id = %facility_id, created = created, "Facility saved");
            }
            Event::FacilityDeleted {
                facility_id,
                dependents_removed,
            } => {
                info!(
                    facility_id = %facility_id,
                    dependents_removed = dependents_removed,
                    "Facility deleted with dependents"
                );
            }
            Event::AmenityTypeUpdated {
                type_id,
                references_touched,
            }
            | Event::TransportationTypeUpdated {
                type_id,
                references_touched,
            } => {
                info!(
                    type_id = %type_id,
                    references_touched = references_touched,
                    "Type registry update fanned out"
                );
            }
            other => {
                debug!("Received event: {:?}", other);
            }
        }
    }

    info!("Event processing loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (sender, mut rx) = create_event_channel(8);
        sender
            .send(Event::FacilityUpdated("AUS10".into()))
            .await
            .unwrap();

        match rx.recv().await {
            Some(Event::FacilityUpdated(id)) => assert_eq!(id, "AUS10"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_fails_once_receiver_is_gone() {
        let (sender, rx) = create_event_channel(1);
        drop(rx);
        assert!(sender
            .send(Event::AmenityCreated(Uuid::new_v4()))
            .await
            .is_err());
    }
}
