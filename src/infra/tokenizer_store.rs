// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the pretrained tokenizer.json that ships with the model
// and wraps it as the domain Encoder + Decoder.
//
// Encoding a pair with special tokens gives the BERT layout:
//   [CLS] question tokens [SEP] context tokens [SEP]
//
// Truncation uses the OnlySecond strategy: when the pair is
// longer than max_length the context is cut, never the question.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokenizers::{Tokenizer, TruncationParams, TruncationStrategy};

use crate::domain::encoding::EncodedPair;
use crate::domain::error::{QaError, QaResult};
use crate::domain::traits::{Decoder, Encoder};

/// Longest sequence DistilBERT's position table covers
pub const DEFAULT_MAX_LENGTH: usize = 512;

pub struct TokenizerStore {
    path: PathBuf,
}

impl TokenizerStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Load tokenizer.json and configure truncation to `max_length`.
    /// Any padding baked into the file is switched off.
    pub fn load(&self, max_length: usize) -> Result<Tokenizer> {
        let mut tokenizer = Tokenizer::from_file(&self.path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", self.path.display(), e
            ))?;

        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                strategy: TruncationStrategy::OnlySecond,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Invalid truncation settings: {e}"))?;

        tracing::info!(
            "Tokenizer loaded from '{}' (vocab {}, max_length {})",
            self.path.display(),
            tokenizer.get_vocab_size(true),
            max_length
        );
        Ok(tokenizer)
    }
}

/// A HuggingFace tokenizer acting as both Encoder and Decoder.
pub struct TokenizerCodec {
    tokenizer:           Tokenizer,
    skip_special_tokens: bool,
}

impl TokenizerCodec {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer, skip_special_tokens: true }
    }

    /// Keep `[CLS]` / `[SEP]` markers in decoded answers.
    pub fn keep_special_tokens(mut self, keep: bool) -> Self {
        self.skip_special_tokens = !keep;
        self
    }
}

impl Encoder for TokenizerCodec {
    fn encode(&self, question: &str, context: &str) -> QaResult<EncodedPair> {
        let encoding = self
            .tokenizer
            .encode((question, context), true)
            .map_err(|e| QaError::Encode(e.to_string()))?;

        if !encoding.get_overflowing().is_empty() {
            tracing::warn!(
                "Context truncated to {} tokens; the answer may lie in the dropped part",
                encoding.len()
            );
        }

        Ok(EncodedPair {
            input_ids:      encoding.get_ids().to_vec(),
            attention_mask: encoding.get_attention_mask().to_vec(),
            type_ids:       encoding.get_type_ids().to_vec(),
            sequence_ids:   encoding.get_sequence_ids(),
        })
    }
}

impl Decoder for TokenizerCodec {
    fn decode(&self, ids: &[u32]) -> QaResult<String> {
        self.tokenizer
            .decode(ids, self.skip_special_tokens)
            .map_err(|e| QaError::Decode(e.to_string()))
    }
}
