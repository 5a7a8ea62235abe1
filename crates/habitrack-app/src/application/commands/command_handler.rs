use async_trait::async_trait;
use habitrack_domain::shared::DomainError;

/// Marker for write-side requests (habit edits, check-ins)
pub trait Command: Send + Sync {}

/// Executes one kind of command and reports its outcome.
///
/// Handlers own persistence and event publishing for their command; the
/// presentation layer only maps the result onto the wire.
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    type Result;

    async fn handle(&self, command: C) -> Result<Self::Result, DomainError>;
}
