//! NearestEventProjector: passes the server's nearest event through for display.

use crate::domain::{format_date, ChangepointSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearestEventView {
    pub date: String,
    pub title: String,
    pub event_type: String,
    pub region: String,
    pub notes: String,
    pub abs_days: u32,
}

impl NearestEventView {
    /// `"1 day away"`, `"10 days away"`.
    pub fn distance_label(&self) -> String {
        match self.abs_days {
            1 => "1 day away".to_string(),
            n => format!("{n} days away"),
        }
    }
}

/// `None` means "no nearby event". Nothing is recomputed here.
pub fn project_nearest(summary: Option<&ChangepointSummary>) -> Option<NearestEventView> {
    let near = summary?.nearest_event.as_ref()?;
    Some(NearestEventView {
        date: format_date(near.event_date),
        title: near.event_title.clone(),
        event_type: near.event_type.clone(),
        region: near.region.clone(),
        notes: near.notes.clone(),
        abs_days: near.abs_days,
    })
}
