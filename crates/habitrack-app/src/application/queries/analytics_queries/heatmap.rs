use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::application::dtos::HeatmapDto;
use habitrack_domain::check_in::CheckIn;
use habitrack_domain::shared::dates::format_date;

pub(super) fn build(start: NaiveDate, end: NaiveDate, check_ins: &[CheckIn]) -> HeatmapDto {
    let mut data: BTreeMap<String, u32> = BTreeMap::new();
    for check_in in check_ins.iter().filter(|c| c.is_completed()) {
        *data.entry(format_date(check_in.date())).or_default() += 1;
    }

    HeatmapDto {
        start_date: format_date(start),
        end_date: format_date(end),
        data,
    }
}
