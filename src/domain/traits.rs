// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The three collaborators the span answerer depends on.
// Layer 6 implements Encoder + Decoder on top of a HuggingFace
// tokenizer and Layer 5 implements Scorer on top of a burn
// model; tests implement all three with a handful of lines.
//
//   question, context ──Encoder──► EncodedPair
//   EncodedPair ────────Scorer───► SpanLogits
//   &[u32] ─────────────Decoder──► String

use std::sync::Arc;

use crate::domain::encoding::{EncodedPair, SpanLogits};
use crate::domain::error::QaResult;

// ─── Encoder ──────────────────────────────────────────────────────────────────
/// Turns a question/context pair into one joint token sequence.
///
/// Must be deterministic for a given (question, context, vocabulary).
pub trait Encoder {
    fn encode(&self, question: &str, context: &str) -> QaResult<EncodedPair>;
}

// ─── Scorer ───────────────────────────────────────────────────────────────────
/// Runs the model over an encoding and returns per-token start/end logits.
/// Both vectors must be as long as `encoded.input_ids`.
pub trait Scorer {
    fn score(&self, encoded: &EncodedPair) -> QaResult<SpanLogits>;
}

// ─── Decoder ──────────────────────────────────────────────────────────────────
/// Detokenizes a run of token ids back into text.
pub trait Decoder {
    fn decode(&self, ids: &[u32]) -> QaResult<String>;
}

impl<T: Encoder + ?Sized> Encoder for &T {
    fn encode(&self, question: &str, context: &str) -> QaResult<EncodedPair> {
        (**self).encode(question, context)
    }
}

impl<T: Scorer + ?Sized> Scorer for &T {
    fn score(&self, encoded: &EncodedPair) -> QaResult<SpanLogits> {
        (**self).score(encoded)
    }
}

impl<T: Decoder + ?Sized> Decoder for &T {
    fn decode(&self, ids: &[u32]) -> QaResult<String> {
        (**self).decode(ids)
    }
}

// One tokenizer usually serves as both Encoder and Decoder
impl<T: Encoder + ?Sized> Encoder for Arc<T> {
    fn encode(&self, question: &str, context: &str) -> QaResult<EncodedPair> {
        (**self).encode(question, context)
    }
}

impl<T: Decoder + ?Sized> Decoder for Arc<T> {
    fn decode(&self, ids: &[u32]) -> QaResult<String> {
        (**self).decode(ids)
    }
}
