// ============================================================
// Layer 2 — Span Answerer
// ============================================================
// The whole question answering pipeline for one pair:
//
//   1. Clean + validate input       (MissingQuestion on no question)
//   2. Encoder: pair → token ids    ([CLS] q [SEP] c [SEP])
//   3. Scorer:  ids  → start/end logits
//   4. Strategy: logits → (start, end)
//   5. Decoder: ids[start..=end] → answer text
//
// The collaborators are passed in by the caller, never loaded
// here, so the pipeline can be exercised with stubs.

use serde::Serialize;

use crate::application::input::QaInput;
use crate::domain::error::QaResult;
use crate::domain::span::{AnswerSpan, SpanStrategy};
use crate::domain::traits::{Decoder, Encoder, Scorer};

/// The outcome of one `answer` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Decoded answer text; empty for a degenerate span or empty context
    pub answer: String,

    /// Span into the encoded sequence, None when no span was selected
    #[serde(flatten)]
    pub span: Option<AnswerSpan>,

    /// start_logit[start] + end_logit[end]
    pub score: Option<f32>,

    /// True when end < start and the answer is therefore empty
    pub degenerate: bool,
}

impl Answer {
    /// The answer over an empty context, or when no span can be chosen.
    pub fn empty() -> Self {
        Self { answer: String::new(), span: None, score: None, degenerate: false }
    }
}

pub struct SpanAnswerer<E, S, D> {
    encoder:  E,
    scorer:   S,
    decoder:  D,
    strategy: SpanStrategy,
}

impl<E, S, D> SpanAnswerer<E, S, D>
where
    E: Encoder,
    S: Scorer,
    D: Decoder,
{
    pub fn new(encoder: E, scorer: S, decoder: D) -> Self {
        Self { encoder, scorer, decoder, strategy: SpanStrategy::default() }
    }

    pub fn with_strategy(mut self, strategy: SpanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Answer `question` from `context`.
    ///
    /// A degenerate span (end before start) is not an error: it
    /// produces an empty answer with `degenerate = true`. A joint
    /// search that finds no context token gives `Answer::empty()`.
    pub fn answer(&self, question: &str, context: &str) -> QaResult<Answer> {
        let input = QaInput::new(question, context)?;
        if !input.has_context() {
            tracing::warn!("Empty context, returning an empty answer");
            return Ok(Answer::empty());
        }

        let encoded = self.encoder.encode(&input.question, &input.context)?;
        tracing::debug!("Encoded pair into {} tokens", encoded.len());

        tracing::info!("Running question answering pipeline");
        let logits = self.scorer.score(&encoded)?;
        let Some(chosen) = self.strategy.select(&encoded, &logits)? else {
            tracing::warn!("No candidate span in the context, returning an empty answer");
            return Ok(Answer::empty());
        };
        let span = chosen.span;
        tracing::debug!(
            "Span [{},{}] score={:.4} strategy={:?}",
            span.start, span.end, chosen.score, self.strategy
        );

        if span.is_degenerate() {
            tracing::warn!(
                "Answer end ({}) precedes start ({}), returning an empty answer",
                span.end, span.start
            );
            return Ok(Answer {
                answer:     String::new(),
                span:       Some(span),
                score:      Some(chosen.score),
                degenerate: true,
            });
        }

        tracing::info!("Decoding qa response");
        let answer = self
            .decoder
            .decode(span.slice(&encoded.input_ids))
            .inspect_err(|e| tracing::error!("{e}"))?;

        Ok(Answer {
            answer,
            span:       Some(span),
            score:      Some(chosen.score),
            degenerate: false,
        })
    }
}
