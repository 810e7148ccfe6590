// src/infrastructure/events.rs
use crate::application::ports::events::ArticleEventPublisher;
use crate::domain::article::ArticleEvent;
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};

/// In-process fan-out of article events over a tokio broadcast channel.
#[derive(Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<ArticleEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ArticleEvent> {
        self.sender.subscribe()
    }
}

impl ArticleEventPublisher for BroadcastEventPublisher {
    fn publish(&self, event: ArticleEvent) {
        // An error only means nobody is listening.
        if self.sender.send(event).is_err() {
            tracing::debug!("article event dropped: no subscribers");
        }
    }
}

/// Log every event until the channel closes.
pub fn spawn_event_logger(mut receiver: broadcast::Receiver<ArticleEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(ArticleEvent::Created { id, title, at }) => {
                    tracing::info!(
                        article_id = %id,
                        title = %title,
                        at = %at,
                        "article created event"
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "article event logger lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
