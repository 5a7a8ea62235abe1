use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::dtos::CheckInDto;
use habitrack_domain::check_in::{CheckInFilter, CheckInRepository};
use habitrack_domain::shared::{Clock, DomainError, HabitId, UserId};

pub struct CheckInQueryService {
    check_in_repo: Arc<dyn CheckInRepository>,
    clock: Arc<dyn Clock>,
    list_limit: u32,
}

impl CheckInQueryService {
    pub fn new(
        check_in_repo: Arc<dyn CheckInRepository>,
        clock: Arc<dyn Clock>,
        list_limit: u32,
    ) -> Self {
        Self {
            check_in_repo,
            clock,
            list_limit,
        }
    }

    /// Most recent first, optionally narrowed to one habit and an inclusive date range
    pub async fn list_check_ins(
        &self,
        user_id: &str,
        habit_id: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<CheckInDto>, DomainError> {
        let filter = CheckInFilter {
            habit_id: habit_id.map(HabitId::from_string),
            start_date,
            end_date,
            completed_only: false,
            limit: Some(self.list_limit),
        };

        let check_ins = self
            .check_in_repo
            .list(&UserId::from_string(user_id), &filter)
            .await?;
        Ok(check_ins.iter().map(CheckInDto::from).collect())
    }

    pub async fn today_check_ins(&self, user_id: &str) -> Result<Vec<CheckInDto>, DomainError> {
        let today = self.clock.today();
        self.list_check_ins(user_id, None, Some(today), Some(today))
            .await
    }
}
