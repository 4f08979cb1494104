// ============================================================
// Layer 3 — QaError
// ============================================================
// Every way a single `answer(question, context)` call can fail.
// Startup failures (model download, weight loading) are not
// listed here: they surface as anyhow errors from Layer 6.

/// Errors produced while answering one question.
#[derive(Debug, thiserror::Error)]
pub enum QaError {
    #[error("question is required")]
    MissingQuestion,

    #[error("failed to encode question/context pair: {0}")]
    Encode(String),

    #[error("model forward pass failed: {0}")]
    Score(String),

    #[error("scorer returned no logits")]
    EmptyScores,

    #[error(
        "scorer returned {start} start logits and {end} end logits for {tokens} tokens"
    )]
    ScoreLengthMismatch { tokens: usize, start: usize, end: usize },

    #[error("failed to decode answer tokens: {0}")]
    Decode(String),
}

pub type QaResult<T> = Result<T, QaError>;
