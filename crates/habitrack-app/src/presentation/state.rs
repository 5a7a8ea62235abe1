use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::queries::{AnalyticsQueryService, CheckInQueryService, HabitQueryService};
use crate::application::services::{ConfigService, StreakService};
use habitrack_domain::check_in::CheckInRepository;
use habitrack_domain::events::EventBus;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::{Clock, SystemClock};
use habitrack_domain::streak::StreakRepository;
use habitrack_infrastructure::config::AppConfig;
use habitrack_infrastructure::persistence::Database;

/// Command handlers container
pub struct CommandHandlers {
    pub create_habit: Arc<CreateHabitCommandHandler>,
    pub update_habit: Arc<UpdateHabitCommandHandler>,
    pub delete_habit: Arc<DeleteHabitCommandHandler>,
    pub archive_habit: Arc<ArchiveHabitCommandHandler>,
    pub reorder_habit: Arc<ReorderHabitCommandHandler>,
    pub record_check_in: Arc<RecordCheckInCommandHandler>,
    pub delete_check_in: Arc<DeleteCheckInCommandHandler>,
}

pub struct Runtime {
    pub pool: Arc<SqlitePool>,
    pub db: Arc<Database>,
    pub event_bus: Arc<dyn EventBus>,
    pub clock: Arc<dyn Clock>,
}

pub struct Repositories {
    pub habit: Arc<dyn HabitRepository>,
    pub check_in: Arc<dyn CheckInRepository>,
    pub streak: Arc<dyn StreakRepository>,
}

pub struct Services {
    pub streak: Arc<StreakService>,
    pub config: Arc<ConfigService>,
}

pub struct Queries {
    pub habit: Arc<HabitQueryService>,
    pub check_in: Arc<CheckInQueryService>,
    pub analytics: Arc<AnalyticsQueryService>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}

impl AppState {
    pub async fn new(config: AppConfig, config_path: PathBuf) -> anyhow::Result<Self> {
        crate::presentation::bootstrap::build_app_state(config, config_path, Arc::new(SystemClock))
            .await
    }
}
