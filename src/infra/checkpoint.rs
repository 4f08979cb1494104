// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Restores a pretrained DistilBERT Q&A model into burn.
//
// What gets read:
//   1. config.json       — architecture (dim, n_layers, n_heads, ...)
//   2. pytorch_model.bin — weights, as published by the model author
//
// The config is needed first: burn builds an empty model of the
// right shape and then load_record() swaps the weights in.
//
// PyTorch and burn disagree on a few parameter names:
//
//   PyTorch                              burn
//   ───────────────────────────────────  ───────────────────────────
//   embeddings.LayerNorm.*               embeddings.layer_norm.*
//   attention.q_lin / k_lin / v_lin      attention.query / key / value
//   attention.out_lin                    attention.output
//   *.weight / *.bias of a LayerNorm     *.gamma / *.beta  (adapter)
//   Linear weight [out, in]              Linear weight [in, out] (adapter)
//
// The last two are handled by burn-import's PyTorch adapter; the
// rest are regex key remaps below.
//
// Reference: Burn Book §8 (Importing PyTorch models)

use anyhow::{bail, Context, Result};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, Recorder},
};
use burn_import::pytorch::{LoadArgs, PyTorchFileRecorder};
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::infra::hub::ModelFiles;
use crate::ml::model::{DistilBertQaConfig, DistilBertQaModel};

/// PyTorch → burn parameter name remaps, applied in order.
const KEY_REMAPS: [(&str, &str); 5] = [
    (r"^distilbert\.embeddings\.LayerNorm\.(.+)$", "distilbert.embeddings.layer_norm.$1"),
    (r"^(.+)\.attention\.q_lin\.(.+)$",   "$1.attention.query.$2"),
    (r"^(.+)\.attention\.k_lin\.(.+)$",   "$1.attention.key.$2"),
    (r"^(.+)\.attention\.v_lin\.(.+)$",   "$1.attention.value.$2"),
    (r"^(.+)\.attention\.out_lin\.(.+)$", "$1.attention.output.$2"),
];

/// The fields of a HuggingFace DistilBERT config.json this crate uses.
#[derive(Debug, Clone, Deserialize)]
pub struct PretrainedConfig {
    #[serde(default)]
    pub model_type: Option<String>,
    pub vocab_size: usize,
    #[serde(default = "default_max_positions")]
    pub max_position_embeddings: usize,
    pub dim:        usize,
    pub n_layers:   usize,
    pub n_heads:    usize,
    pub hidden_dim: usize,
    #[serde(default = "default_activation")]
    pub activation: String,
}

fn default_max_positions() -> usize {
    512
}

fn default_activation() -> String {
    "gelu".to_string()
}

impl PretrainedConfig {
    /// Check the config describes something DistilBertQaModel can load.
    pub fn validate(&self) -> Result<()> {
        if let Some(model_type) = &self.model_type {
            if model_type != "distilbert" {
                bail!("Unsupported model type '{model_type}', expected 'distilbert'");
            }
        }
        if self.activation != "gelu" {
            bail!("Unsupported activation '{}', expected 'gelu'", self.activation);
        }
        if self.n_heads == 0 || self.dim % self.n_heads != 0 {
            bail!("dim ({}) must be divisible by n_heads ({})", self.dim, self.n_heads);
        }
        Ok(())
    }

    pub fn to_model_config(&self) -> DistilBertQaConfig {
        DistilBertQaConfig::new(
            self.vocab_size,
            self.max_position_embeddings,
            self.dim,
            self.n_layers,
            self.n_heads,
            self.hidden_dim,
        )
    }
}

/// Loads config and weights of one pretrained model.
pub struct CheckpointManager {
    config_path:  PathBuf,
    weights_path: PathBuf,
}

impl CheckpointManager {
    pub fn new(files: &ModelFiles) -> Self {
        Self {
            config_path:  files.config.clone(),
            weights_path: files.weights.clone(),
        }
    }

    /// Read config.json and turn it into the burn model config.
    pub fn load_config(&self) -> Result<DistilBertQaConfig> {
        let json = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Cannot read config from '{}'", self.config_path.display()))?;
        let cfg = parse_config(&json)
            .with_context(|| format!("Invalid model config '{}'", self.config_path.display()))?;
        Ok(cfg.to_model_config())
    }

    /// Load the PyTorch weights into `model`.
    ///
    /// The model must have been built from this checkpoint's config,
    /// otherwise the tensor shapes will not line up.
    pub fn load_model<B: Backend>(
        &self,
        model:  DistilBertQaModel<B>,
        device: &B::Device,
    ) -> Result<DistilBertQaModel<B>> {
        tracing::info!("Loading weights from '{}'", self.weights_path.display());

        let args = KEY_REMAPS.iter().fold(
            LoadArgs::new(self.weights_path.clone()),
            |args, (pattern, replacement)| args.with_key_remap(pattern, replacement),
        );

        let record = PyTorchFileRecorder::<FullPrecisionSettings>::default()
            .load(args, device)
            .map_err(|e| anyhow::anyhow!("{e:?}"))
            .with_context(|| {
                format!("Cannot load weights from '{}'", self.weights_path.display())
            })?;

        Ok(model.load_record(record))
    }
}

/// Parse and validate a config.json body.
pub fn parse_config(json: &str) -> Result<PretrainedConfig> {
    let cfg: PretrainedConfig = serde_json::from_str(json)?;
    cfg.validate()?;
    Ok(cfg)
}
