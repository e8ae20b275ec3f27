use bullion_model::{alert::PriceAlert, price::MetalPrices};
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Quotes(MetalPrices),
    AlertTriggered { alert: PriceAlert, price: f64 },
}

#[derive(Debug, Clone)]
pub struct EventTx {
    receiver_dropped: bool,

    event_tx: mpsc::UnboundedSender<Event>,
}

impl EventTx {
    pub fn new(event_tx: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            receiver_dropped: false,
            event_tx,
        }
    }

    pub fn receiver_dropped(&self) -> bool {
        self.receiver_dropped
    }
}

pub trait MessageTransmitter<Message> {
    fn send(&mut self, message: Message);

    fn send_many(&mut self, messages: Vec<Message>);
}

impl MessageTransmitter<Event> for EventTx {
    fn send(&mut self, message: Event) {
        if self.receiver_dropped {
            return;
        }

        if self.event_tx.send(message).is_err() {
            warn!(
                action = "setting receiver_dropped = true",
                why = "event receiver dropped",
                "cannot send events"
            );
            self.receiver_dropped = true
        }
    }

    fn send_many(&mut self, messages: Vec<Event>) {
        for message in messages {
            self.send(message);
            if self.receiver_dropped {
                break;
            }
        }
    }
}
