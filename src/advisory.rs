//! Weather advisory workflow
//!
//! Generating and publishing advisories is delegated to an
//! [`AdvisoryService`]. The bundled [`SimulatedAdvisoryService`] stands in
//! for a real backend with fixed delays and a canned advisory text.
//! [`AdvisoryDesk`] drives the dialog: generate, edit, publish or cancel,
//! with every service call bounded by a timeout. Dropping an in-flight call
//! abandons it without touching the draft or the airport selection.

use crate::config::AdvisoryConfig;
use crate::{DashboardError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A generated (and possibly hand-edited) advisory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub issued_at: DateTime<Utc>,
    pub text: String,
}

/// Acknowledgment returned once an advisory is published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub published_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
}

/// Backend that writes and distributes advisories
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    async fn generate(&self) -> Result<Advisory>;
    async fn publish(&self, advisory: &Advisory) -> Result<PublishReceipt>;
}

/// Advisory backend that waits a fixed time and always succeeds
#[derive(Debug, Clone)]
pub struct SimulatedAdvisoryService {
    generate_delay: Duration,
    publish_delay: Duration,
}

impl SimulatedAdvisoryService {
    #[must_use]
    pub fn new(generate_delay: Duration, publish_delay: Duration) -> Self {
        Self {
            generate_delay,
            publish_delay,
        }
    }

    #[must_use]
    pub fn from_config(config: &AdvisoryConfig) -> Self {
        Self::new(
            Duration::from_millis(config.generate_delay_ms),
            Duration::from_millis(config.publish_delay_ms),
        )
    }
}

#[async_trait]
impl AdvisoryService for SimulatedAdvisoryService {
    async fn generate(&self) -> Result<Advisory> {
        tokio::time::sleep(self.generate_delay).await;
        let issued_at = Utc::now();
        Ok(Advisory {
            issued_at,
            text: sample_advisory(issued_at),
        })
    }

    async fn publish(&self, advisory: &Advisory) -> Result<PublishReceipt> {
        tokio::time::sleep(self.publish_delay).await;
        debug!(chars = advisory.text.len(), "Simulated advisory publication");
        Ok(PublishReceipt {
            published_at: Utc::now(),
            title: "Advisory Published".to_string(),
            description:
                "The weather advisory has been successfully published to all stakeholders."
                    .to_string(),
        })
    }
}

fn sample_advisory(issued_at: DateTime<Utc>) -> String {
    format!(
        "WEATHER ADVISORY - URGENT

ISSUED: {issued}

CURRENT CONDITIONS:
Severe weather conditions are affecting multiple airport operations in the region. Strong winds exceeding 35 mph with gusts up to 50 mph are creating hazardous conditions for aircraft operations.

AFFECTED AIRPORTS:
- JFK International Airport: Winds 38 mph, gusts 48 mph, visibility 3 miles
- LaGuardia Airport: Winds 42 mph, gusts 52 mph, visibility 2.5 miles
- Newark Liberty International: Winds 35 mph, gusts 45 mph, visibility 4 miles

FLIGHT IMPACT:
- Delays expected for all departures and arrivals
- Possible flight diversions due to crosswind limitations
- Ground stop may be implemented if conditions worsen

RECOMMENDATIONS:
1. Passengers should check with airlines for flight status updates
2. Allow extra time for travel to airports
3. Consider postponing non-essential flights
4. Monitor weather updates regularly

DURATION:
These conditions are expected to persist for the next 4-6 hours with gradual improvement expected after 18:00 UTC.

NEXT UPDATE:
Advisory will be updated in 2 hours or sooner if conditions change significantly.

For real-time updates, contact your airline or check airport websites.

END OF ADVISORY",
        issued = issued_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// The advisory dialog: holds the current draft between service calls
pub struct AdvisoryDesk<S> {
    service: S,
    timeout: Duration,
    draft: Option<Advisory>,
}

impl<S: AdvisoryService> AdvisoryDesk<S> {
    #[must_use]
    pub fn new(service: S, timeout: Duration) -> Self {
        Self {
            service,
            timeout,
            draft: None,
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&Advisory> {
        self.draft.as_ref()
    }

    /// Generate a fresh draft, replacing any existing one.
    ///
    /// On failure the previous draft is kept.
    #[instrument(skip(self))]
    pub async fn generate(&mut self) -> Result<&Advisory> {
        let advisory = bounded("generate", self.timeout, self.service.generate()).await?;
        info!(issued_at = %advisory.issued_at, "Advisory generated");
        Ok(&*self.draft.insert(advisory))
    }

    /// Replace the draft text with the operator's edit
    pub fn edit(&mut self, text: impl Into<String>) -> Result<()> {
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| DashboardError::validation("no advisory draft to edit"))?;
        draft.text = text.into();
        Ok(())
    }

    /// Publish the current draft and close the dialog.
    ///
    /// The draft is cleared only when publication succeeds.
    #[instrument(skip(self))]
    pub async fn publish(&mut self) -> Result<PublishReceipt> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| DashboardError::validation("no advisory draft to publish"))?;
        if draft.text.trim().is_empty() {
            return Err(DashboardError::validation("advisory text is empty"));
        }

        let receipt = bounded("publish", self.timeout, self.service.publish(draft)).await?;
        info!(published_at = %receipt.published_at, "{}", receipt.title);
        self.draft = None;
        Ok(receipt)
    }

    /// Close the dialog, discarding the draft
    pub fn cancel(&mut self) {
        if self.draft.take().is_some() {
            debug!("Advisory draft discarded");
        }
    }
}

async fn bounded<T>(
    operation: &'static str,
    limit: Duration,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => {
            result.inspect_err(|e| warn!(operation, error = %e, "Advisory call failed"))
        }
        Err(_) => {
            warn!(operation, ?limit, "Advisory call timed out");
            Err(DashboardError::AdvisoryTimeout {
                operation,
                after: limit,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn desk(
        generate_ms: u64,
        publish_ms: u64,
        timeout_ms: u64,
    ) -> AdvisoryDesk<SimulatedAdvisoryService> {
        AdvisoryDesk::new(
            SimulatedAdvisoryService::new(
                Duration::from_millis(generate_ms),
                Duration::from_millis(publish_ms),
            ),
            Duration::from_millis(timeout_ms),
        )
    }

    /// Service whose publish step always fails
    struct BrokenPublisher {
        publish_calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AdvisoryService for BrokenPublisher {
        async fn generate(&self) -> Result<Advisory> {
            Ok(Advisory {
                issued_at: Utc::now(),
                text: "TEST ADVISORY".to_string(),
            })
        }

        async fn publish(&self, _advisory: &Advisory) -> Result<PublishReceipt> {
            self.publish_calls.fetch_add(1, Ordering::SeqCst);
            Err(DashboardError::advisory("distribution list unreachable"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_then_publish() {
        let mut desk = desk(2000, 1500, 5000);
        let advisory = desk.generate().await.unwrap();
        assert!(advisory.text.starts_with("WEATHER ADVISORY - URGENT"));
        assert!(advisory.text.contains("ISSUED: "));
        assert!(advisory.text.ends_with("END OF ADVISORY"));

        let receipt = desk.publish().await.unwrap();
        assert_eq!(receipt.title, "Advisory Published");
        assert!(desk.draft().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_delay_is_honoured() {
        let mut desk = desk(2000, 1500, 5000);
        let start = tokio::time::Instant::now();
        desk.generate().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_draft() {
        let mut desk = desk(10, 10, 1000);
        assert!(matches!(
            desk.edit("too early"),
            Err(DashboardError::Validation { .. })
        ));

        desk.generate().await.unwrap();
        desk.edit("WIND ADVISORY: gusts 40 kt").unwrap();
        assert_eq!(desk.draft().unwrap().text, "WIND ADVISORY: gusts 40 kt");
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_without_draft() {
        let mut desk = desk(10, 10, 1000);
        let err = desk.publish().await.unwrap_err();
        assert!(err.to_string().contains("no advisory draft"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_empty_text_rejected() {
        let mut desk = desk(10, 10, 1000);
        desk.generate().await.unwrap();
        desk.edit("   ").unwrap();
        assert!(matches!(
            desk.publish().await,
            Err(DashboardError::Validation { .. })
        ));
        assert!(desk.draft().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_timeout() {
        let mut desk = desk(10_000, 10, 1000);
        let err = desk.generate().await.unwrap_err();
        assert_eq!(
            err,
            DashboardError::AdvisoryTimeout {
                operation: "generate",
                after: Duration::from_millis(1000),
            }
        );
        assert!(desk.draft().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_failure_keeps_draft() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut desk = AdvisoryDesk::new(
            BrokenPublisher {
                publish_calls: Arc::clone(&calls),
            },
            Duration::from_secs(1),
        );
        desk.generate().await.unwrap();

        let err = desk.publish().await.unwrap_err();
        assert!(matches!(err, DashboardError::Advisory { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(desk.draft().unwrap().text, "TEST ADVISORY");
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_generate_leaves_draft_alone() {
        let mut desk = desk(2000, 10, 5000);
        let abandoned = tokio::time::timeout(Duration::from_millis(100), desk.generate()).await;
        assert!(abandoned.is_err());
        assert!(desk.draft().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_draft() {
        let mut desk = desk(10, 10, 1000);
        desk.generate().await.unwrap();
        desk.cancel();
        assert!(desk.draft().is_none());
    }
}
