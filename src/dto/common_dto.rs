use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional created-at window applied to list queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRangeFilterDto {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
