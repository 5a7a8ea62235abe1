use async_trait::async_trait;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use habitrack_domain::events::{DomainEvent, DynamicEventHandler, EventBus};
use habitrack_domain::shared::DomainError;

/// In-process event bus; handlers run in subscription order on the publishing task.
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<&'static str, Vec<Arc<dyn DynamicEventHandler>>>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe a handler to a specific event type
    pub async fn subscribe<E: DomainEvent + 'static>(&self, handler: Arc<dyn DynamicEventHandler>) {
        let event_type_name = std::any::type_name::<E>();
        let mut handlers = self.handlers.write().await;

        handlers.entry(event_type_name).or_default().push(handler);

        info!("[events] subscribed handler event_type={}", event_type_name);
    }

    pub async fn handler_count<E: DomainEvent + 'static>(&self) -> usize {
        let handlers = self.handlers.read().await;
        handlers
            .get(std::any::type_name::<E>())
            .map_or(0, |h| h.len())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let event_type_name = event.event_type_name();
        let handlers = self.handlers.read().await;

        let Some(event_handlers) = handlers.get(event_type_name) else {
            debug!("[events] no handlers event_type={}", event_type_name);
            return Ok(());
        };

        for handler in event_handlers {
            // A failing handler does not stop the others or fail the publisher
            if let Err(e) = handler.handle_dynamic(event.as_any()).await {
                error!(
                    "[events] handler failed event_type={} error={}",
                    event_type_name, e
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use habitrack_domain::events::habit_events::{HabitCreated, HabitDeleted};
    use habitrack_domain::events::{EventHandler, TypedEventHandlerWrapper};
    use habitrack_domain::shared::{HabitId, UserId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EventHandler<HabitCreated> for CountingHandler {
        async fn handle(&self, _event: &HabitCreated) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler<HabitCreated> for FailingHandler {
        async fn handle(&self, _event: &HabitCreated) -> Result<(), DomainError> {
            Err(DomainError::Infrastructure("boom".to_string()))
        }
    }

    fn habit_created() -> Box<HabitCreated> {
        Box::new(HabitCreated {
            habit_id: HabitId::new(),
            user_id: UserId::new(),
            name: "Read".to_string(),
            occurred_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribed_handlers() {
        let bus = InMemoryEventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        bus.subscribe::<HabitCreated>(Arc::new(TypedEventHandlerWrapper::new(FailingHandler)))
            .await;
        bus.subscribe::<HabitCreated>(Arc::new(TypedEventHandlerWrapper::new(CountingHandler {
            calls: calls.clone(),
        })))
        .await;

        assert_eq!(bus.handler_count::<HabitCreated>().await, 2);
        bus.publish(habit_created()).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_publish_without_handlers_is_ok() {
        let bus = InMemoryEventBus::new();
        let event = Box::new(HabitDeleted {
            habit_id: HabitId::new(),
            user_id: UserId::new(),
            occurred_at: Utc::now(),
        });

        assert!(bus.publish(event).await.is_ok());
        assert_eq!(bus.handler_count::<HabitDeleted>().await, 0);
    }
}
