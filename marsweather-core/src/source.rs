use std::{fmt::Debug, num::NonZeroU32};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::Result,
    model::{ArchivePage, LatestReport},
};

pub mod maas;

/// Anything that can answer the three Mars weather queries.
///
/// [`maas::MaasClient`] talks to the real service; host programs can
/// implement this for stubs in their own tests.
#[async_trait]
pub trait MarsWeatherSource: Send + Sync + Debug {
    async fn latest(&self) -> Result<LatestReport>;

    async fn archive_page(&self, page: NonZeroU32) -> Result<ArchivePage>;

    async fn archive_range(&self, from: NaiveDate, to: NaiveDate) -> Result<ArchivePage>;
}
