//! Extractive question answering over a pretrained DistilBERT model.
//!
//! Given a question and a context passage, the answer is the run of
//! context tokens between the model's best start and end positions.
//!
//! ```text
//! cli          — flags, output
//! application  — input validation, SpanAnswerer pipeline, model wiring
//! domain       — encodings, span selection, errors, collaborator traits
//! ml           — burn DistilBERT model + Scorer implementation
//! infra        — HuggingFace Hub files, tokenizer, checkpoint loading
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infra;
pub mod ml;

pub use application::span_answerer::{Answer, SpanAnswerer};
pub use domain::error::{QaError, QaResult};
pub use domain::span::{AnswerSpan, SpanStrategy};
