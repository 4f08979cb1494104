// End-to-end runs against the real distilbert-base-uncased-distilled-squad
// weights. They download ~260 MB on first use, so they are ignored by
// default:
//
//   cargo test --test end_to_end -- --ignored

use extractive_qa::application::ask_use_case::{AskConfig, AskUseCase};
use extractive_qa::{QaError, SpanStrategy};

fn use_case(strategy: SpanStrategy) -> AskUseCase {
    let config = AskConfig { strategy, ..AskConfig::default() };
    AskUseCase::new(&config).unwrap()
}

#[test]
#[ignore = "downloads the pretrained model"]
fn capital_of_france() {
    let qa = use_case(SpanStrategy::Independent);
    let answer = qa
        .answer("What is the capital of France?", "Paris is the capital of France.")
        .unwrap();
    assert!(answer.answer.contains("paris"), "got {:?}", answer.answer);
    assert!(!answer.degenerate);
}

#[test]
#[ignore = "downloads the pretrained model"]
fn joint_strategy_agrees_on_clear_answer() {
    let qa = use_case(SpanStrategy::Joint { max_answer_len: 30 });
    let answer = qa
        .answer("What is the capital of France?", "Paris is the capital of France.")
        .unwrap();
    assert!(answer.answer.contains("paris"), "got {:?}", answer.answer);
}

#[test]
#[ignore = "downloads the pretrained model"]
fn empty_context_gives_empty_answer() {
    let qa = use_case(SpanStrategy::Independent);
    let answer = qa.answer("What is the capital of France?", "").unwrap();
    assert_eq!(answer.answer, "");
}

#[test]
#[ignore = "downloads the pretrained model"]
fn empty_question_is_rejected() {
    let qa = use_case(SpanStrategy::Independent);
    let err = qa.answer("", "Paris is the capital of France.").unwrap_err();
    assert!(matches!(err, QaError::MissingQuestion));
}

#[test]
#[ignore = "downloads the pretrained model"]
fn repeated_calls_agree() {
    let qa = use_case(SpanStrategy::Independent);
    let q  = "Who wrote the report?";
    let c  = "The report was written by Ada Lovelace in 1843.";
    assert_eq!(qa.answer(q, c).unwrap(), qa.answer(q, c).unwrap());
}
