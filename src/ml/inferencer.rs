// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::Result;
use burn::prelude::*;

use crate::domain::encoding::{EncodedPair, SpanLogits};
use crate::domain::error::{QaError, QaResult};
use crate::domain::traits::Scorer;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::DistilBertQaModel;

pub struct Inferencer<B: Backend> {
    model:  DistilBertQaModel<B>,
    device: B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(model: DistilBertQaModel<B>, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Build the model from the checkpoint's config and load its weights.
    pub fn from_checkpoint(ckpt: &CheckpointManager, device: B::Device) -> Result<Self> {
        let cfg   = ckpt.load_config()?;
        let model = cfg.init::<B>(&device);
        let model = ckpt.load_model(model, &device)?;
        tracing::info!(
            "Model loaded: {} layers, dim {}, {} heads",
            cfg.n_layers, cfg.dim, cfg.n_heads
        );
        Ok(Self::new(model, device))
    }

    fn to_tensor(&self, values: &[u32]) -> Tensor<B, 2, Int> {
        let flat: Vec<i32> = values.iter().map(|&v| v as i32).collect();
        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device).unsqueeze::<2>()
    }
}

impl<B: Backend> Scorer for Inferencer<B> {
    fn score(&self, encoded: &EncodedPair) -> QaResult<SpanLogits> {
        let seq_len = encoded.len();
        if seq_len == 0 {
            return Err(QaError::Score("empty token sequence".to_string()));
        }
        if seq_len > self.model.max_position_embeddings {
            return Err(QaError::Score(format!(
                "{} tokens exceed the model's {} positions",
                seq_len, self.model.max_position_embeddings
            )));
        }
        if encoded.attention_mask.len() != seq_len {
            return Err(QaError::Score(format!(
                "attention mask has {} entries for {} tokens",
                encoded.attention_mask.len(), seq_len
            )));
        }

        let input_ids      = self.to_tensor(&encoded.input_ids);
        let attention_mask = self.to_tensor(&encoded.attention_mask);

        let output = self.model.forward(input_ids, attention_mask);

        let to_vec = |t: Tensor<B, 2>| -> QaResult<Vec<f32>> {
            t.reshape([seq_len])
                .into_data()
                .to_vec::<f32>()
                .map_err(|e| QaError::Score(format!("cannot read logits: {e:?}")))
        };
        let start_logits = to_vec(output.start_logits)?;
        let end_logits   = to_vec(output.end_logits)?;

        Ok(SpanLogits::new(start_logits, end_logits))
    }
}
