use async_trait::async_trait;

use crate::entities::Event;

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn write_combined(&self, events: &[Event]) -> anyhow::Result<()>;
    async fn write_sport(&self, slug: &str, events: &[Event]) -> anyhow::Result<()>;
    async fn write_cancelled_today(&self, events: &[Event]) -> anyhow::Result<()>;
    async fn write_calendar(&self, document: &str) -> anyhow::Result<()>;
}
