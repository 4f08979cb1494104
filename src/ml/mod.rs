// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All burn framework code lives here. No other layer builds
// tensors or touches modules directly.
//
//   model.rs      — DistilBERT encoder + span head (burn modules)
//   inferencer.rs — implements the domain Scorer trait:
//                   ids → tensors → forward pass → Vec<f32> logits
//
// Inference runs on a plain (non-autodiff) backend, so no
// gradient graph is ever recorded.
//
// Reference: Burn Book §3 (Building Blocks)

/// DistilBERT question answering architecture
pub mod model;

/// Scorer implementation over a loaded model
pub mod inferencer;

/// Backend used for inference: GPU with the `wgpu` feature, CPU otherwise
#[cfg(feature = "wgpu")]
pub type InferBackend = burn::backend::Wgpu;

#[cfg(not(feature = "wgpu"))]
pub type InferBackend = burn::backend::NdArray;
