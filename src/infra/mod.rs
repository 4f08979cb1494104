// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches disk or network:
//
//   hub.rs             — finds config.json, tokenizer.json and
//                        pytorch_model.bin, either in a local
//                        directory or in the HuggingFace Hub cache
//                        (downloading them on first use)
//
//   tokenizer_store.rs — loads the pretrained tokenizer, sets up
//                        truncation, and adapts it to the domain
//                        Encoder / Decoder traits
//
//   checkpoint.rs      — reads the model config and loads the
//                        PyTorch weights into the burn model
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Model file resolution (local dir or HuggingFace Hub)
pub mod hub;

/// Tokenizer loading and the Encoder/Decoder adapter
pub mod tokenizer_store;

/// Pretrained config + weight loading
pub mod checkpoint;
