/// Similar-watch recommendations
///
/// Describes the selected watch and every other catalog watch to the
/// generative service, asks for the ids of the three most similar ones and
/// maps those ids back onto the catalog. Ids with no catalog match are
/// dropped, so a result may hold fewer than three watches.

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::{ContentGenerator, GenerationError};
use crate::state::catalog::Catalog;
use crate::state::data::{SelectedSummary, Watch, WatchSummary};
use crate::state::detail::RECOMMENDATION_ERROR_MESSAGE;

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("reply is not the expected JSON: {0}")]
    MalformedReply(#[from] serde_json::Error),

    #[error("reply contained no watch ids")]
    NoIds,
}

impl RecommendationError {
    /// The single message shown to the user for any failure
    pub fn user_message(&self) -> &'static str {
        RECOMMENDATION_ERROR_MESSAGE
    }
}

/// Typed reply of the generative service
#[derive(Deserialize, Debug)]
struct SimilarWatchIds {
    // Numbers, not integers: the schema only promises NUMBER
    similar_watch_ids: Vec<f64>,
}

/// JSON schema the reply must follow
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "similar_watch_ids": {
                "type": "ARRAY",
                "description": "An array of three numbers, where each number is the ID of a similar watch.",
                "items": { "type": "NUMBER" }
            }
        },
        "required": ["similar_watch_ids"]
    })
}

/// Build the instruction for the selected watch against the rest of the catalog
pub fn build_prompt(selected: &Watch, catalog: &Catalog) -> Result<String, serde_json::Error> {
    let candidates: Vec<WatchSummary<'_>> = catalog
        .watches()
        .iter()
        .filter(|watch| watch.id != selected.id)
        .map(WatchSummary::from)
        .collect();

    let selected = serde_json::to_string(&SelectedSummary::from(selected))?;
    let candidates = serde_json::to_string(&candidates)?;

    Ok(format!(
        "Given the main watch: {selected}. And the following list of available watches: {candidates}. \
         Identify the three most similar watches from the list based on style, brand, features, and price. \
         Return only a JSON object."
    ))
}

/// Parse the reply into the returned ids, rejecting an empty list
fn parse_reply(reply: &str) -> Result<Vec<f64>, RecommendationError> {
    let parsed: SimilarWatchIds = serde_json::from_str(reply.trim())?;
    if parsed.similar_watch_ids.is_empty() {
        return Err(RecommendationError::NoIds);
    }
    Ok(parsed.similar_watch_ids)
}

/// Catalog watches whose id was returned, in catalog order, each at most once
fn resolve(ids: &[f64], catalog: &Catalog) -> Vec<Watch> {
    catalog
        .watches()
        .iter()
        .filter(|watch| ids.iter().any(|&id| id == f64::from(watch.id)))
        .cloned()
        .collect()
}

/// Finds watches similar to a selected one using a content generator
#[derive(Clone)]
pub struct Recommender {
    generator: Arc<dyn ContentGenerator>,
    timeout: Duration,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Recommender {
    pub fn new(generator: Arc<dyn ContentGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Ask the service for watches similar to `selected`.
    ///
    /// Single shot: no retries. Unknown ids are dropped silently.
    pub async fn find_similar(
        &self,
        selected: &Watch,
        catalog: &Catalog,
    ) -> Result<Vec<Watch>, RecommendationError> {
        let prompt = build_prompt(selected, catalog)?;
        let schema = response_schema();

        let reply = tokio::time::timeout(self.timeout, self.generator.generate_json(&prompt, &schema))
            .await
            .map_err(|_| GenerationError::TimedOut)??;

        let ids = parse_reply(&reply)?;
        let found = resolve(&ids, catalog);

        if found.len() < ids.len() {
            tracing::debug!(
                returned = ids.len(),
                matched = found.len(),
                "some recommended ids are not in the catalog"
            );
        }
        tracing::info!(
            watch_id = selected.id,
            matched = found.len(),
            "similar watches found"
        );

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::sample_watch;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Generator that replays a canned reply and records the prompt
    struct Stub {
        reply: Result<String, fn() -> GenerationError>,
        prompts: Mutex<Vec<String>>,
    }

    impl Stub {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(error: fn() -> GenerationError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(error),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ContentGenerator for Stub {
        async fn generate_json(
            &self,
            prompt: &str,
            _schema: &serde_json::Value,
        ) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(error) => Err(error()),
            }
        }
    }

    /// Generator that never answers
    struct Silent;

    #[async_trait]
    impl ContentGenerator for Silent {
        async fn generate_json(
            &self,
            _prompt: &str,
            _schema: &serde_json::Value,
        ) -> Result<String, GenerationError> {
            std::future::pending().await
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            sample_watch(1, "Rolex", "Submariner", "$10,000"),
            sample_watch(2, "Omega", "Seamaster", "$6,000"),
            sample_watch(3, "Tudor", "Pelagos", "$5,000"),
        ])
        .unwrap()
    }

    fn recommender(generator: Arc<dyn ContentGenerator>) -> Recommender {
        Recommender::new(generator, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_unknown_ids_are_dropped() {
        let catalog = Catalog::new(vec![
            sample_watch(1, "A", "X", "$100"),
            sample_watch(2, "B", "Y", "$500"),
        ])
        .unwrap();
        let stub = Stub::replying(r#"{"similar_watch_ids":[1,2,999]}"#);
        let selected = sample_watch(50, "C", "Z", "$300");

        let found = recommender(stub).find_similar(&selected, &catalog).await.unwrap();

        let ids: Vec<u32> = found.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_no_matches_is_not_an_error() {
        let stub = Stub::replying(r#"{"similar_watch_ids":[100,200,300]}"#);
        let catalog = catalog();
        let found = recommender(stub)
            .find_similar(&catalog.watches()[0], &catalog)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_results_follow_catalog_order_once() {
        let stub = Stub::replying(r#"{"similar_watch_ids":[3.0,2,3]}"#);
        let catalog = catalog();
        let found = recommender(stub)
            .find_similar(&catalog.watches()[0], &catalog)
            .await
            .unwrap();
        let ids: Vec<u32> = found.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_missing_field_is_uniform_error() {
        let stub = Stub::replying(r#"{"watches":[1,2]}"#);
        let catalog = catalog();
        let error = recommender(stub)
            .find_similar(&catalog.watches()[0], &catalog)
            .await
            .unwrap_err();
        assert!(matches!(error, RecommendationError::MalformedReply(_)));
        assert_eq!(error.user_message(), RECOMMENDATION_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_replies() {
        let catalog = catalog();
        for reply in ["not json", r#"{"similar_watch_ids":"1,2"}"#, r#"{"similar_watch_ids":[]}"#] {
            let result = recommender(Stub::replying(reply))
                .find_similar(&catalog.watches()[0], &catalog)
                .await;
            let error = result.unwrap_err();
            assert_eq!(error.user_message(), RECOMMENDATION_ERROR_MESSAGE, "reply: {reply}");
        }
    }

    #[tokio::test]
    async fn test_empty_id_list_is_rejected() {
        let catalog = catalog();
        let result = recommender(Stub::replying(r#"{"similar_watch_ids":[]}"#))
            .find_similar(&catalog.watches()[0], &catalog)
            .await;
        assert!(matches!(result, Err(RecommendationError::NoIds)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_uniform_error() {
        let catalog = catalog();
        let error = recommender(Stub::failing(|| GenerationError::Status {
            status: 503,
            body: "overloaded".to_string(),
        }))
        .find_similar(&catalog.watches()[0], &catalog)
        .await
        .unwrap_err();
        assert!(matches!(
            error,
            RecommendationError::Generation(GenerationError::Status { status: 503, .. })
        ));
        assert_eq!(error.user_message(), RECOMMENDATION_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_timeout() {
        let catalog = catalog();
        let recommender = Recommender::new(Arc::new(Silent), Duration::from_millis(20));
        let result = recommender.find_similar(&catalog.watches()[0], &catalog).await;
        assert!(matches!(
            result,
            Err(RecommendationError::Generation(GenerationError::TimedOut))
        ));
    }

    #[tokio::test]
    async fn test_prompt_excludes_selected_watch_and_images() {
        let stub = Stub::replying(r#"{"similar_watch_ids":[2]}"#);
        let catalog = catalog();
        recommender(stub.clone())
            .find_similar(&catalog.watches()[0], &catalog)
            .await
            .unwrap();

        let prompts = stub.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let prompt = &prompts[0];
        assert!(prompt.contains(r#"Given the main watch: {"brand":"Rolex","model":"Submariner""#));
        assert!(prompt.contains(r#""model":"Seamaster""#));
        assert!(prompt.contains(r#""caseMaterial":"Steel""#));
        assert!(!prompt.contains(r#""id":1,"#));
        assert!(!prompt.contains("imageUrls"));
        assert!(!prompt.contains("example.com"));
        assert!(prompt.contains("Identify the three most similar watches"));
    }

    #[test]
    fn test_schema_requires_id_array() {
        let schema = response_schema();
        assert_eq!(schema["properties"]["similar_watch_ids"]["type"], "ARRAY");
        assert_eq!(schema["properties"]["similar_watch_ids"]["items"]["type"], "NUMBER");
        assert_eq!(schema["required"][0], "similar_watch_ids");
    }
}
