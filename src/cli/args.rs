// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// All flags of the single `extractive-qa` command, and the
// conversion into the application-layer AskConfig.

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::application::ask_use_case::AskConfig;
use crate::domain::span::{SpanStrategy, DEFAULT_MAX_ANSWER_LEN};
use crate::infra::hub::{ModelSource, DEFAULT_MODEL, DEFAULT_REVISION};
use crate::infra::tokenizer_store::DEFAULT_MAX_LENGTH;

/// How the answer span is picked from the start/end logits
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    /// argmax(start) and argmax(end) separately; may give an empty answer
    Independent,
    /// best start+end score with start <= end inside the context
    Joint,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question to ask
    #[arg(long)]
    pub question: Option<String>,

    /// Context based on which the answer should be given
    #[arg(long, default_value = "transcribe")]
    pub context: String,

    /// HuggingFace Hub model id
    #[arg(long, env = "QA_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Hub revision (branch, tag or commit)
    #[arg(long, env = "QA_MODEL_REVISION", default_value = DEFAULT_REVISION)]
    pub revision: String,

    /// Local directory with config.json, tokenizer.json and pytorch_model.bin.
    /// Takes precedence over --model
    #[arg(long, env = "QA_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Maximum number of tokens for question + context (context is cut first)
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Span selection strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Independent)]
    pub strategy: StrategyArg,

    /// Longest answer in tokens (joint strategy only)
    #[arg(long, default_value_t = DEFAULT_MAX_ANSWER_LEN)]
    pub max_answer_len: usize,

    /// Keep [CLS]/[SEP] markers in the decoded answer
    #[arg(long)]
    pub keep_special_tokens: bool,

    /// Print the answer, span and score as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskArgs {
    pub fn model_source(&self) -> ModelSource {
        match &self.model_dir {
            Some(dir) => ModelSource::Local(dir.clone()),
            None => ModelSource::Hub {
                repo_id:  self.model.clone(),
                revision: self.revision.clone(),
            },
        }
    }

    pub fn span_strategy(&self) -> SpanStrategy {
        match self.strategy {
            StrategyArg::Independent => SpanStrategy::Independent,
            StrategyArg::Joint => SpanStrategy::Joint { max_answer_len: self.max_answer_len },
        }
    }
}

/// The application layer never sees clap types.
impl From<&AskArgs> for AskConfig {
    fn from(a: &AskArgs) -> Self {
        AskConfig {
            model:               a.model_source(),
            max_length:          a.max_length,
            strategy:            a.span_strategy(),
            keep_special_tokens: a.keep_special_tokens,
        }
    }
}
