// tests/support/mocks/events.rs
use articles_api::application::ports::events::ArticleEventPublisher;
use articles_api::domain::article::ArticleEvent;
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<ArticleEvent>>,
}

impl RecordingEventPublisher {
    pub fn events(&self) -> Vec<ArticleEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ArticleEventPublisher for RecordingEventPublisher {
    fn publish(&self, event: ArticleEvent) {
        self.events.lock().unwrap().push(event);
    }
}
