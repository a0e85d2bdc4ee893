//! HTTP embedding client for OpenAI-compatible `/v1/embeddings` endpoints

use crate::config::LlmServiceConfig;
use crate::error::{BookragError, Result};
use crate::llm::cache::{embedding_cache_key, ApiMetrics, ResponseCache};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

/// Embedding generation trait
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for batch of texts
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Embedder that delegates to an external HTTP service
pub struct HttpEmbedder {
    http_client: reqwest::Client,
    config: LlmServiceConfig,
    dimensions: usize,
    cache: Arc<ResponseCache>,
    metrics: Arc<ApiMetrics>,
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl HttpEmbedder {
    /// Create from configuration
    pub fn new(config: LlmServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(BookragError::Http)?;

        let dimensions = config.embedding_dimensions.unwrap_or(768);

        Ok(Self {
            http_client,
            config,
            dimensions,
            cache: Arc::new(ResponseCache::new()),
            metrics: Arc::new(ApiMetrics::default()),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LlmServiceConfig::default())
    }

    /// Embed many texts as concurrent fixed-size batches.
    ///
    /// Results come back in input order regardless of completion order.
    pub async fn embed_batch_concurrent(
        &self,
        texts: &[String],
        batch_size: usize,
        max_concurrent: usize,
    ) -> Result<Vec<Vec<f32>>> {
        const DEFAULT_BATCH_SIZE: usize = 32;
        const DEFAULT_CONCURRENT: usize = 4;

        let batch_size = if batch_size > 0 {
            batch_size
        } else {
            DEFAULT_BATCH_SIZE
        };
        let concurrent = if max_concurrent > 0 {
            max_concurrent
        } else {
            DEFAULT_CONCURRENT
        };

        let batches: Vec<_> = texts.chunks(batch_size).collect();
        tracing::info!(
            "Embedding {} texts in {} batches ({} concurrent)",
            texts.len(),
            batches.len(),
            concurrent
        );

        let mut results: Vec<_> = stream::iter(batches)
            .enumerate()
            .map(|(idx, batch)| async move { (idx, self.embed_batch(batch).await) })
            .buffer_unordered(concurrent)
            .collect()
            .await;
        results.sort_by_key(|(idx, _)| *idx);

        let mut all = Vec::with_capacity(texts.len());
        for (_, result) in results {
            all.extend(result?);
        }
        Ok(all)
    }

    async fn fetch_embeddings(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let request = EmbedRequest {
            model: self.config.embedding_model.clone(),
            input: texts,
        };

        let url = format!("{}/v1/embeddings", self.config.embeddings_url());
        let mut req = self.http_client.post(&url).json(&request);
        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await.map_err(|e| {
            self.metrics.total_errors.fetch_add(1, Ordering::Relaxed);
            BookragError::Http(e)
        })?;

        if !response.status().is_success() {
            self.metrics.total_errors.fetch_add(1, Ordering::Relaxed);
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BookragError::ExternalError(format!(
                "Embedding service error (HTTP {}): {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response.json().await.map_err(|e| {
            self.metrics.total_errors.fetch_add(1, Ordering::Relaxed);
            BookragError::Http(e)
        })?;

        Ok(embed_response
            .data
            .into_iter()
            .map(|d| d.embedding)
            .collect())
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text.to_string()];
        let results = self.embed_batch(&texts).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| BookragError::Llm("No embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.metrics.total_requests.fetch_add(1, Ordering::Relaxed);

        let mut results: Vec<Option<Vec<f32>>> = Vec::with_capacity(texts.len());
        let mut uncached_texts = Vec::new();
        let mut uncached_indices = Vec::new();

        for (i, text) in texts.iter().enumerate() {
            let key = embedding_cache_key(&self.config.embedding_model, text);
            if let Some(cached) = self.cache.get(&key) {
                if let Ok(embedding) = serde_json::from_str::<Vec<f32>>(&cached) {
                    self.metrics.cache_hits.fetch_add(1, Ordering::Relaxed);
                    results.push(Some(embedding));
                    continue;
                }
            }
            self.metrics.cache_misses.fetch_add(1, Ordering::Relaxed);
            results.push(None);
            uncached_texts.push(text.clone());
            uncached_indices.push(i);
        }

        if uncached_texts.is_empty() {
            tracing::debug!("All {} embeddings from cache", texts.len());
            return Ok(results.into_iter().flatten().collect());
        }

        let fetched = self.fetch_embeddings(uncached_texts.clone()).await?;
        if fetched.len() != uncached_indices.len() {
            return Err(BookragError::ExternalError(format!(
                "Embedding service returned {} vectors for {} inputs",
                fetched.len(),
                uncached_indices.len()
            )));
        }

        for (slot, embedding) in uncached_indices.iter().zip(fetched) {
            let key = embedding_cache_key(&self.config.embedding_model, &texts[*slot]);
            if let Ok(json) = serde_json::to_string(&embedding) {
                self.cache.set(key, json);
            }
            results[*slot] = Some(embedding);
        }

        Ok(results.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.config.embedding_model
    }
}
