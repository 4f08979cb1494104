// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the flags, validates the question before any model is
// loaded, runs the ask use case and prints the result.
//
//   extractive-qa --question "What is the capital of France?" \
//                 --context  "Paris is the capital of France."
//
// stdout carries only the answer (or JSON with --json); logs
// go to stderr. Any failure exits non-zero.

pub mod args;

use anyhow::Result;
use clap::Parser;

use crate::application::ask_use_case::{AskConfig, AskUseCase};
use crate::application::input::QaInput;
use args::AskArgs;

#[derive(Parser, Debug)]
#[command(
    name = "extractive-qa",
    version,
    about = "Input question and context based on which the answer should be given."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: AskArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let args = self.args;

        // Fail on a missing question before paying for a model load
        let input = QaInput::new(args.question.as_deref().unwrap_or_default(), &args.context)?;

        let config   = AskConfig::from(&args);
        let use_case = AskUseCase::new(&config)?;
        let answer   = use_case.answer(&input.question, &input.context)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&answer)?);
        } else {
            println!("{}", answer.answer);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::domain::error::QaError;
    use crate::domain::span::SpanStrategy;
    use crate::infra::hub::ModelSource;

    fn parse(argv: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("extractive-qa").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--question", "Who?"]);
        assert_eq!(cli.args.question.as_deref(), Some("Who?"));
        assert_eq!(cli.args.context, "transcribe");
        assert!(!cli.args.json);

        let config = AskConfig::from(&cli.args);
        assert_eq!(config.strategy, SpanStrategy::Independent);
        assert_eq!(config.max_length, 512);
        assert!(!config.keep_special_tokens);
    }

    #[test]
    fn test_joint_strategy_carries_max_answer_len() {
        let cli = parse(&["--question", "q", "--strategy", "joint", "--max-answer-len", "12"]);
        assert_eq!(
            cli.args.span_strategy(),
            SpanStrategy::Joint { max_answer_len: 12 }
        );
    }

    #[test]
    fn test_model_dir_overrides_hub() {
        let cli = parse(&["--question", "q", "--model", "someone/model", "--model-dir", "/models/qa"]);
        assert_eq!(cli.args.model_source(), ModelSource::Local(PathBuf::from("/models/qa")));
    }

    #[test]
    fn test_hub_source_uses_model_and_revision() {
        let cli = parse(&["--question", "q", "--model", "someone/model", "--revision", "v2"]);
        assert_eq!(
            cli.args.model_source(),
            ModelSource::Hub { repo_id: "someone/model".into(), revision: "v2".into() }
        );
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let res = Cli::try_parse_from(["extractive-qa", "--strategy", "greedy"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_missing_question_fails_before_model_load() {
        // Points at a model dir that does not exist: reaching the loader
        // would produce a different error.
        let cli = parse(&["--context", "Paris is the capital of France.", "--model-dir", "/nope"]);
        let err = cli.run().unwrap_err();
        assert!(matches!(err.downcast_ref::<QaError>(), Some(QaError::MissingQuestion)));
    }

    #[test]
    fn test_empty_question_fails_before_model_load() {
        let cli = parse(&["--question", "", "--model-dir", "/nope"]);
        let err = cli.run().unwrap_err();
        assert_eq!(err.to_string(), "question is required");
    }
}
