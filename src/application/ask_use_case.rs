// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// Loads the pretrained pieces once and answers with them:
//   1. Resolve model files (local dir or HuggingFace Hub)
//   2. Load tokenizer.json  → Encoder + Decoder
//   3. Load config + weights → Scorer
//   4. Wire all three into a SpanAnswerer

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::application::span_answerer::{Answer, SpanAnswerer};
use crate::domain::error::QaResult;
use crate::domain::span::SpanStrategy;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::hub::ModelSource;
use crate::infra::tokenizer_store::{TokenizerCodec, TokenizerStore, DEFAULT_MAX_LENGTH};
use crate::ml::{inferencer::Inferencer, InferBackend};

/// Everything needed to build the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskConfig {
    pub model:               ModelSource,
    pub max_length:          usize,
    pub strategy:            SpanStrategy,
    pub keep_special_tokens: bool,
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            model:               ModelSource::default(),
            max_length:          DEFAULT_MAX_LENGTH,
            strategy:            SpanStrategy::default(),
            keep_special_tokens: false,
        }
    }
}

type Pipeline = SpanAnswerer<Arc<TokenizerCodec>, Inferencer<InferBackend>, Arc<TokenizerCodec>>;

pub struct AskUseCase {
    answerer: Pipeline,
}

impl AskUseCase {
    pub fn new(config: &AskConfig) -> Result<Self> {
        tracing::info!("Loading model {}", config.model);
        let files = config.model.resolve()?;

        let tokenizer = TokenizerStore::new(&files.tokenizer).load(config.max_length)?;
        let codec     = Arc::new(
            TokenizerCodec::new(tokenizer).keep_special_tokens(config.keep_special_tokens),
        );

        let ckpt       = CheckpointManager::new(&files);
        let inferencer = Inferencer::<InferBackend>::from_checkpoint(&ckpt, Default::default())
            .with_context(|| format!("Cannot load model {}", config.model))?;

        let answerer = SpanAnswerer::new(codec.clone(), inferencer, codec)
            .with_strategy(config.strategy);
        Ok(Self { answerer })
    }

    pub fn answer(&self, question: &str, context: &str) -> QaResult<Answer> {
        self.answerer.answer(question, context)
    }
}
