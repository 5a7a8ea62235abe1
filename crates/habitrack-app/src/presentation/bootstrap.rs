use anyhow::anyhow;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::event_handlers::{ActivityLogEventHandler, StreakRefreshEventHandler};
use crate::application::queries::{AnalyticsQueryService, CheckInQueryService, HabitQueryService};
use crate::application::services::{ConfigService, StreakService};
use crate::presentation::state::{
    AppState, CommandHandlers, Queries, Repositories, Runtime, Services,
};
use habitrack_domain::check_in::CheckInRepository;
use habitrack_domain::events::habit_events::{
    CheckInDeleted, CheckInRecorded, HabitCreated, HabitDeleted, HabitUpdated,
};
use habitrack_domain::events::{EventBus, TypedEventHandlerWrapper};
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::Clock;
use habitrack_domain::streak::StreakRepository;
use habitrack_infrastructure::config::AppConfig;
use habitrack_infrastructure::events::InMemoryEventBus;
use habitrack_infrastructure::persistence::{
    repositories::{SqliteCheckInRepository, SqliteHabitRepository, SqliteStreakRepository},
    Database,
};

/// Open the configured database file and wire every service on top of it.
pub async fn build_app_state(
    config: AppConfig,
    config_path: PathBuf,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<AppState> {
    let db_path = config.database_path.clone();
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow!("Invalid database path: {}", db_path.display()))?;
    info!("Database path: {}", db_path_str);

    let started_at = Instant::now();
    let database = Database::new(db_path_str).await?;
    info!(
        "✓ Database connection established ({}ms)",
        started_at.elapsed().as_millis()
    );

    build_app_state_with_database(database, config, config_path, clock).await
}

/// Same wiring over a private in-memory database.
pub async fn build_in_memory_app_state(
    config_path: PathBuf,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<AppState> {
    let database = Database::in_memory().await?;
    build_app_state_with_database(database, AppConfig::default(), config_path, clock).await
}

pub async fn build_app_state_with_database(
    database: Database,
    config: AppConfig,
    config_path: PathBuf,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<AppState> {
    let startup_started_at = Instant::now();

    let started_at = Instant::now();
    database.run_migrations().await?;
    info!(
        "✓ Migrations completed ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(database.pool().clone());
    let history_limit = config.history_limit;

    let habit_repo =
        Arc::new(SqliteHabitRepository::new(pool.clone())) as Arc<dyn HabitRepository>;
    let check_in_repo = Arc::new(SqliteCheckInRepository::with_history_limit(
        pool.clone(),
        history_limit,
    )) as Arc<dyn CheckInRepository>;
    let streak_repo =
        Arc::new(SqliteStreakRepository::new(pool.clone())) as Arc<dyn StreakRepository>;

    let streak_service = Arc::new(StreakService::new(
        check_in_repo.clone(),
        streak_repo.clone(),
        clock.clone(),
    ));
    let config_service = Arc::new(ConfigService::new(config, config_path));

    let event_bus = Arc::new(InMemoryEventBus::new());

    // Frequency edits change how the stored history is counted
    let streak_refresh_handler =
        StreakRefreshEventHandler::new(habit_repo.clone(), streak_service.clone());
    event_bus
        .subscribe::<HabitUpdated>(TypedEventHandlerWrapper::<HabitUpdated, _>::shared(
            streak_refresh_handler,
        ))
        .await;

    let activity_log = ActivityLogEventHandler::new();
    event_bus
        .subscribe::<HabitCreated>(TypedEventHandlerWrapper::<HabitCreated, _>::shared(
            activity_log.clone(),
        ))
        .await;
    event_bus
        .subscribe::<HabitDeleted>(TypedEventHandlerWrapper::<HabitDeleted, _>::shared(
            activity_log.clone(),
        ))
        .await;
    event_bus
        .subscribe::<CheckInRecorded>(TypedEventHandlerWrapper::<CheckInRecorded, _>::shared(
            activity_log.clone(),
        ))
        .await;
    event_bus
        .subscribe::<CheckInDeleted>(TypedEventHandlerWrapper::<CheckInDeleted, _>::shared(
            activity_log,
        ))
        .await;
    info!("✓ Event bus initialized and handlers registered");

    let event_bus = event_bus as Arc<dyn EventBus>;

    let command_handlers = CommandHandlers {
        create_habit: Arc::new(CreateHabitCommandHandler::new(
            habit_repo.clone(),
            event_bus.clone(),
            clock.clone(),
        )),
        update_habit: Arc::new(UpdateHabitCommandHandler::new(
            habit_repo.clone(),
            event_bus.clone(),
            clock.clone(),
        )),
        delete_habit: Arc::new(DeleteHabitCommandHandler::new(
            habit_repo.clone(),
            check_in_repo.clone(),
            streak_repo.clone(),
            event_bus.clone(),
        )),
        archive_habit: Arc::new(ArchiveHabitCommandHandler::new(habit_repo.clone())),
        reorder_habit: Arc::new(ReorderHabitCommandHandler::new(habit_repo.clone())),
        record_check_in: Arc::new(RecordCheckInCommandHandler::new(
            habit_repo.clone(),
            check_in_repo.clone(),
            streak_service.clone(),
            event_bus.clone(),
        )),
        delete_check_in: Arc::new(DeleteCheckInCommandHandler::new(
            habit_repo.clone(),
            check_in_repo.clone(),
            streak_service.clone(),
            event_bus.clone(),
        )),
    };

    let queries = Queries {
        habit: Arc::new(HabitQueryService::new(
            habit_repo.clone(),
            streak_service.clone(),
        )),
        check_in: Arc::new(CheckInQueryService::new(
            check_in_repo.clone(),
            clock.clone(),
            history_limit,
        )),
        analytics: Arc::new(AnalyticsQueryService::new(
            habit_repo.clone(),
            check_in_repo.clone(),
            streak_service.clone(),
        )),
    };

    info!(
        "✓ Application state ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime: Runtime {
            pool,
            db: Arc::new(database),
            event_bus,
            clock,
        },
        repositories: Repositories {
            habit: habit_repo,
            check_in: check_in_repo,
            streak: streak_repo,
        },
        services: Services {
            streak: streak_service,
            config: config_service,
        },
        queries,
        command_handlers,
    })
}
