// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types and traits describing extractive Q&A:
// what an encoded question/context pair looks like, what the
// scorer hands back, how an answer span is chosen, and the
// three collaborator seams (encoder, scorer, decoder).
//
// Rules for this layer:
//   - NO burn types
//   - NO tokenizers types
//   - NO file I/O or network calls
//
// Everything here is unit testable with plain vectors.

/// Encoded inputs and scorer outputs
pub mod encoding;

/// Span selection over start/end logits
pub mod span;

/// Error taxonomy for a single answer computation
pub mod error;

/// Encoder / Scorer / Decoder collaborator traits
pub mod traits;
