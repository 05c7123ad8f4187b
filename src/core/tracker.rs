use crate::core::form::build_payload;
use crate::core::render::{render_record, Labels};
use crate::domain::model::{FormData, StatusKind};
use crate::domain::ports::{MetricsApi, MetricsView};
use crate::utils::error::ErrorSeverity;

pub const DEFAULT_LIST_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    Failed {
        message: String,
        severity: ErrorSeverity,
    },
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved)
    }

    /// A failed submit never exits 0, even for low severity errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            SubmitOutcome::Saved => 0,
            SubmitOutcome::Failed { severity, .. } => severity.exit_code().max(1),
        }
    }
}

/// Drives the submit and list flows against a view.
pub struct MetricsTracker<A: MetricsApi> {
    api: A,
    list_limit: u32,
    labels: Labels,
}

impl<A: MetricsApi> MetricsTracker<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            list_limit: DEFAULT_LIST_LIMIT,
            labels: Labels::default(),
        }
    }

    pub fn with_list_limit(mut self, limit: u32) -> Self {
        self.list_limit = limit;
        self
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Reload the most recent records into the view.
    ///
    /// Failures leave the view untouched and return `false`.
    pub async fn load_metrics<V: MetricsView>(&self, view: &mut V) -> bool {
        match self.api.list_metrics(self.list_limit).await {
            Ok(records) => {
                view.clear_items();
                for record in &records {
                    view.append_item(render_record(record, &self.labels));
                }
                tracing::debug!("Rendered {} records", records.len());
                true
            }
            Err(e) => {
                tracing::debug!("Metrics list not refreshed: {}", e);
                false
            }
        }
    }

    /// Save one form submission. The list is reloaded only after a successful save.
    pub async fn submit<V: MetricsView>(&self, form: &FormData, view: &mut V) -> SubmitOutcome {
        view.set_status(&self.labels.saving, StatusKind::Neutral);

        let result = match build_payload(form) {
            Ok(payload) => self.api.create_metric(&payload).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => {
                view.set_status(&self.labels.saved, StatusKind::Success);
                self.load_metrics(view).await;
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::warn!("Submit failed: {} (Category: {:?})", e, e.category());
                let message = e.user_friendly_message();
                view.set_status(
                    &format!("{}{}", self.labels.error_prefix, message),
                    StatusKind::Error,
                );
                SubmitOutcome::Failed {
                    message,
                    severity: e.severity(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::page::HtmlPage;
    use crate::domain::model::{MetricPayload, MetricRecord};
    use crate::utils::error::{Result, TrackerError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockApi {
        records: Vec<MetricRecord>,
        reject_with: Option<String>,
        list_fails: bool,
        list_calls: AtomicUsize,
        created: Mutex<Vec<MetricPayload>>,
    }

    impl MockApi {
        fn new(records: Vec<MetricRecord>) -> Self {
            Self {
                records,
                reject_with: None,
                list_fails: false,
                list_calls: AtomicUsize::new(0),
                created: Mutex::new(Vec::new()),
            }
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetricsApi for MockApi {
        async fn list_metrics(&self, limit: u32) -> Result<Vec<MetricRecord>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.list_fails {
                return Err(TrackerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "offline",
                )));
            }
            Ok(self.records.iter().take(limit as usize).cloned().collect())
        }

        async fn create_metric(&self, payload: &MetricPayload) -> Result<serde_json::Value> {
            if let Some(message) = &self.reject_with {
                return Err(TrackerError::RejectedError {
                    status: 422,
                    message: message.clone(),
                });
            }
            self.created.lock().unwrap().push(payload.clone());
            Ok(serde_json::json!({"id": 1}))
        }

        async fn health(&self) -> Result<()> {
            Ok(())
        }
    }

    fn record(url: &str) -> MetricRecord {
        MetricRecord {
            url: url.to_string(),
            strategy: Some("mobile".to_string()),
            ..Default::default()
        }
    }

    fn form() -> FormData {
        [("url", "https://example.com"), ("score_performance", "90")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_submit_outcome_exit_codes() {
        assert_eq!(SubmitOutcome::Saved.exit_code(), 0);

        let failed = |severity| SubmitOutcome::Failed {
            message: "nope".to_string(),
            severity,
        };
        assert_eq!(failed(ErrorSeverity::Low).exit_code(), 1);
        assert_eq!(failed(ErrorSeverity::Medium).exit_code(), 2);
        assert_eq!(failed(ErrorSeverity::High).exit_code(), 1);
        assert_eq!(failed(ErrorSeverity::Critical).exit_code(), 3);
    }

    #[tokio::test]
    async fn test_successful_submit_reloads_once() {
        let tracker = MetricsTracker::new(MockApi::new(vec![record("https://example.com")]));
        let mut page = HtmlPage::new();

        let outcome = tracker.submit(&form(), &mut page).await;

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(tracker.api().list_calls(), 1);
        assert_eq!(page.status(), "Сохранено ✅");
        assert_eq!(page.status_kind(), StatusKind::Success);
        assert_eq!(page.items().len(), 1);
        assert_eq!(tracker.api().created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_submit_shows_detail_without_reload() {
        let mut api = MockApi::new(vec![record("https://example.com")]);
        api.reject_with = Some("score_seo must be <= 100".to_string());
        let tracker = MetricsTracker::new(api);
        let mut page = HtmlPage::new();

        let outcome = tracker.submit(&form(), &mut page).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "score_seo must be <= 100".to_string(),
                severity: ErrorSeverity::High,
            }
        );
        assert_eq!(tracker.api().list_calls(), 0);
        assert_eq!(page.status(), "Ошибка: score_seo must be <= 100");
        assert_eq!(page.status_kind(), StatusKind::Error);
        assert!(page.items().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_api() {
        let tracker = MetricsTracker::new(MockApi::new(vec![]))
            .with_labels(Labels::english());
        let mut page = HtmlPage::new();
        let form: FormData = [("lcp_ms", "1000")].into_iter().collect();

        let outcome = tracker.submit(&form, &mut page).await;

        assert!(!outcome.is_saved());
        assert!(tracker.api().created.lock().unwrap().is_empty());
        assert_eq!(tracker.api().list_calls(), 0);
        assert!(page.status().starts_with("Error: "));
        assert!(page.status().contains("url"));
    }

    #[tokio::test]
    async fn test_load_replaces_items_and_respects_limit() {
        let records = (0..15)
            .map(|i| record(&format!("https://site{}.dev", i)))
            .collect();
        let tracker = MetricsTracker::new(MockApi::new(records));
        let mut page = HtmlPage::new();
        page.append_item("<div>stale</div>".to_string());

        assert!(tracker.load_metrics(&mut page).await);

        assert_eq!(page.items().len(), DEFAULT_LIST_LIMIT as usize);
        assert!(page.items()[0].contains("https://site0.dev"));
        assert!(!page.items().iter().any(|i| i.contains("stale")));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_existing_items() {
        let mut api = MockApi::new(vec![]);
        api.list_fails = true;
        let tracker = MetricsTracker::new(api).with_list_limit(5);
        let mut page = HtmlPage::new();
        page.append_item("<div>kept</div>".to_string());

        assert!(!tracker.load_metrics(&mut page).await);

        assert_eq!(page.items(), ["<div>kept</div>".to_string()]);
        assert_eq!(page.status_kind(), StatusKind::Neutral);
    }
}
