use async_trait::async_trait;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use super::DomainEvent;
use crate::shared::DomainError;

/// Publishes habit and check-in events to whoever subscribed.
///
/// Command handlers publish after their writes have been persisted, so a
/// subscriber always observes committed state.
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError>;
}

#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    async fn handle(&self, event: &E) -> Result<(), DomainError>;
}

/// Handler as stored by a bus, keyed by `event_type_name`
#[async_trait]
pub trait DynamicEventHandler: Send + Sync {
    async fn handle_dynamic(&self, event: &(dyn Any + Send + Sync)) -> Result<(), DomainError>;

    fn event_type_name(&self) -> &'static str;
}

/// Adapts an `EventHandler<E>` so it can be registered on a bus.
pub struct TypedEventHandlerWrapper<E: DomainEvent + 'static, H: EventHandler<E>> {
    handler: H,
    _event: PhantomData<fn(E)>,
}

impl<E: DomainEvent + 'static, H: EventHandler<E> + 'static> TypedEventHandlerWrapper<E, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _event: PhantomData,
        }
    }

    /// Wrap and erase in one step, ready for `subscribe::<E>`.
    pub fn shared(handler: H) -> Arc<dyn DynamicEventHandler> {
        Arc::new(Self::new(handler))
    }
}

#[async_trait]
impl<E: DomainEvent + 'static, H: EventHandler<E>> DynamicEventHandler
    for TypedEventHandlerWrapper<E, H>
{
    async fn handle_dynamic(&self, event: &(dyn Any + Send + Sync)) -> Result<(), DomainError> {
        match event.downcast_ref::<E>() {
            Some(event) => self.handler.handle(event).await,
            None => Err(DomainError::Infrastructure(format!(
                "Handler for {} received a different event",
                std::any::type_name::<E>()
            ))),
        }
    }

    fn event_type_name(&self) -> &'static str {
        std::any::type_name::<E>()
    }
}
