// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to answer one question:
//
//   input.rs          — validates and cleans the raw question
//                       and context strings
//   span_answerer.rs  — encode → score → select span → decode,
//                       over injected collaborators
//   ask_use_case.rs   — loads the pretrained tokenizer + model
//                       and wires them into a SpanAnswerer
//
// No ML math and no printing here.

/// Question/context validation and cleanup
pub mod input;

/// The encode → score → select → decode pipeline
pub mod span_answerer;

/// Loads a pretrained model and answers a question with it
pub mod ask_use_case;
