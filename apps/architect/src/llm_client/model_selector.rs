//! Model Selector — picks a model identifier the provider currently serves.
//!
//! Order: first available entry of `MODEL_PRIORITY`, else the first model in
//! the catalog, else `FALLBACK_MODEL`. The catalog is queried on every call;
//! a listing failure never fails the request.

use std::fmt;

use serde::Serialize;

use super::ModelCatalog;

/// Preferred models, best first. Names as the catalog reports them.
pub const MODEL_PRIORITY: &[&str] = &[
    "models/gemini-1.5-flash-latest",
    "models/gemini-1.5-flash",
    "models/gemini-pro",
];

/// Used when the catalog cannot be listed or lists nothing.
pub const FALLBACK_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    CatalogUnavailable { message: String },
    CatalogEmpty,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::CatalogUnavailable { message } => {
                write!(f, "model catalog unavailable: {message}")
            }
            FallbackReason::CatalogEmpty => f.write_str("model catalog lists no generation models"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ModelSelection {
    /// A `MODEL_PRIORITY` entry present in the catalog.
    Preferred { model: String },
    /// No preferred model listed; first catalog entry.
    FirstAvailable { model: String },
    Fallback { model: String, reason: FallbackReason },
}

impl ModelSelection {
    pub fn model(&self) -> &str {
        match self {
            ModelSelection::Preferred { model }
            | ModelSelection::FirstAvailable { model }
            | ModelSelection::Fallback { model, .. } => model,
        }
    }
}

/// Queries the catalog and applies the priority order.
pub async fn select_model<C>(catalog: &C) -> ModelSelection
where
    C: ModelCatalog + ?Sized,
{
    match catalog.generation_models().await {
        Ok(available) => choose_from(&available),
        Err(e) => ModelSelection::Fallback {
            model: FALLBACK_MODEL.to_string(),
            reason: FallbackReason::CatalogUnavailable {
                message: e.to_string(),
            },
        },
    }
}

/// The pure part of selection, given a fetched catalog.
pub fn choose_from(available: &[String]) -> ModelSelection {
    if let Some(preferred) = MODEL_PRIORITY
        .iter()
        .find(|p| available.iter().any(|a| a == *p))
    {
        return ModelSelection::Preferred {
            model: preferred.to_string(),
        };
    }

    match available.first() {
        Some(first) => ModelSelection::FirstAvailable {
            model: first.clone(),
        },
        None => ModelSelection::Fallback {
            model: FALLBACK_MODEL.to_string(),
            reason: FallbackReason::CatalogEmpty,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    struct StubCatalog {
        models: Result<Vec<&'static str>, u16>,
        calls: AtomicUsize,
    }

    impl StubCatalog {
        fn listing(models: Vec<&'static str>) -> Self {
            Self {
                models: Ok(models),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                models: Err(status),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelCatalog for StubCatalog {
        async fn generation_models(&self) -> Result<Vec<String>, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.models {
                Ok(models) => Ok(models.iter().map(|m| m.to_string()).collect()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "listing failed".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_priority_entry_wins_over_catalog_order() {
        let catalog = StubCatalog::listing(vec![
            "models/gemini-pro",
            "models/gemini-ultra",
            "models/gemini-1.5-flash",
        ]);
        let selection = select_model(&catalog).await;
        assert_eq!(
            selection,
            ModelSelection::Preferred {
                model: "models/gemini-1.5-flash".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_first_catalog_entry_when_no_priority_match() {
        let catalog = StubCatalog::listing(vec!["models/gemini-2.0-flash", "models/gemini-ultra"]);
        let selection = select_model(&catalog).await;
        assert_eq!(
            selection,
            ModelSelection::FirstAvailable {
                model: "models/gemini-2.0-flash".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_catalog_failure_falls_back() {
        let catalog = StubCatalog::failing(500);
        let selection = select_model(&catalog).await;
        assert_eq!(selection.model(), FALLBACK_MODEL);
        match selection {
            ModelSelection::Fallback {
                reason: FallbackReason::CatalogUnavailable { message },
                ..
            } => assert!(message.contains("listing failed")),
            other => panic!("expected catalog-unavailable fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_catalog_falls_back() {
        let catalog = StubCatalog::listing(vec![]);
        let selection = select_model(&catalog).await;
        assert_eq!(
            selection,
            ModelSelection::Fallback {
                model: FALLBACK_MODEL.to_string(),
                reason: FallbackReason::CatalogEmpty,
            }
        );
    }

    #[tokio::test]
    async fn test_catalog_queried_on_every_selection() {
        let catalog = StubCatalog::listing(vec!["models/gemini-pro"]);
        select_model(&catalog).await;
        select_model(&catalog).await;
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_latest_flash_is_most_preferred() {
        let available = vec![
            "models/gemini-1.5-flash".to_string(),
            "models/gemini-1.5-flash-latest".to_string(),
        ];
        assert_eq!(choose_from(&available).model(), "models/gemini-1.5-flash-latest");
    }

    #[test]
    fn test_selection_serializes_with_strategy_tag() {
        let selection = ModelSelection::Fallback {
            model: FALLBACK_MODEL.to_string(),
            reason: FallbackReason::CatalogEmpty,
        };
        let value = serde_json::to_value(&selection).unwrap();
        assert_eq!(value["strategy"], "fallback");
        assert_eq!(value["model"], "gemini-1.5-flash");
        assert_eq!(value["reason"]["kind"], "catalog_empty");
    }
}
