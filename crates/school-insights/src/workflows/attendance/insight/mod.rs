mod client;

pub use client::{AttendanceContext, InsightPayload, RegionalInsightClient};

use super::domain::{AttendanceSnapshot, Locale, NarrativeReport, SchoolRecord};
use crate::config::InsightServiceConfig;
use std::future::Future;

/// Everything the remote service is told about one school.
#[derive(Debug, Clone, Copy)]
pub struct InsightRequest<'a> {
    pub school: &'a SchoolRecord,
    pub snapshot: &'a AttendanceSnapshot,
    pub locale: Locale,
    /// Caller-owned credential, forwarded as-is.
    pub bearer_token: Option<&'a str>,
}

/// Reason the remote narrative could not be used. Every variant is recovered
/// by composing the report locally.
#[derive(Debug, thiserror::Error)]
pub enum InsightUnavailable {
    #[error("regional insight service is not configured")]
    Disabled,
    #[error("regional insight transport failed: {0}")]
    Transport(String),
    #[error("regional insight service answered HTTP {0}")]
    Status(u16),
    #[error("regional insight response was malformed: {0}")]
    Malformed(String),
}

impl InsightUnavailable {
    /// Short reason code safe to hand back to callers. The detailed message
    /// stays in the logs.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Transport(_) => "unreachable",
            Self::Status(_) => "status",
            Self::Malformed(_) => "malformed",
        }
    }
}

/// Source of remotely generated narratives. One attempt per call, no retry.
pub trait InsightProvider: Send + Sync {
    fn request(
        &self,
        request: InsightRequest<'_>,
    ) -> impl Future<Output = Result<NarrativeReport, InsightUnavailable>> + Send;
}

/// Provider used when no endpoint is configured; always defers to the local
/// composer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineInsightProvider;

impl InsightProvider for OfflineInsightProvider {
    async fn request(
        &self,
        _request: InsightRequest<'_>,
    ) -> Result<NarrativeReport, InsightUnavailable> {
        Err(InsightUnavailable::Disabled)
    }
}

/// Provider chosen from configuration at start-up.
#[derive(Debug, Clone)]
pub enum InsightBackend {
    Remote(RegionalInsightClient),
    Offline(OfflineInsightProvider),
}

impl InsightBackend {
    pub fn from_config(config: &InsightServiceConfig) -> Result<Self, InsightUnavailable> {
        match config.endpoint.as_deref() {
            Some(endpoint) => Ok(Self::Remote(RegionalInsightClient::new(
                endpoint,
                config.timeout,
            )?)),
            None => Ok(Self::Offline(OfflineInsightProvider)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl InsightProvider for InsightBackend {
    async fn request(
        &self,
        request: InsightRequest<'_>,
    ) -> Result<NarrativeReport, InsightUnavailable> {
        match self {
            Self::Remote(client) => client.request(request).await,
            Self::Offline(offline) => offline.request(request).await,
        }
    }
}
