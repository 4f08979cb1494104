// ============================================================
// Layer 6 — Model Hub
// ============================================================
// A pretrained Q&A model is three files:
//
//   config.json        — architecture hyperparameters
//   tokenizer.json     — vocabulary + normalisation rules
//   pytorch_model.bin  — trained weights
//
// They come either from a directory the user points at, or
// from a HuggingFace Hub repository. Hub downloads land in the
// shared hf-hub cache (~/.cache/huggingface/hub, or $HF_HOME),
// so only the first run touches the network.

use anyhow::{bail, Context, Result};
use hf_hub::{api::sync::Api, Repo, RepoType};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL:    &str = "distilbert-base-uncased-distilled-squad";
pub const DEFAULT_REVISION: &str = "main";

pub const CONFIG_FILE:    &str = "config.json";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const WEIGHTS_FILE:   &str = "pytorch_model.bin";

/// Where the pretrained model comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Hub { repo_id: String, revision: String },
    Local(PathBuf),
}

impl Default for ModelSource {
    fn default() -> Self {
        ModelSource::Hub {
            repo_id:  DEFAULT_MODEL.to_string(),
            revision: DEFAULT_REVISION.to_string(),
        }
    }
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Hub { repo_id, revision } => write!(f, "{repo_id}@{revision}"),
            ModelSource::Local(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Paths to the three files of a pretrained model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub config:    PathBuf,
    pub tokenizer: PathBuf,
    pub weights:   PathBuf,
}

impl ModelSource {
    /// Locate (and if needed download) the model files.
    pub fn resolve(&self) -> Result<ModelFiles> {
        match self {
            ModelSource::Local(dir) => resolve_local(dir),
            ModelSource::Hub { repo_id, revision } => resolve_hub(repo_id, revision),
        }
    }
}

fn resolve_local(dir: &Path) -> Result<ModelFiles> {
    if !dir.is_dir() {
        bail!("Model directory '{}' does not exist", dir.display());
    }
    let require = |name: &str| -> Result<PathBuf> {
        let path = dir.join(name);
        if !path.is_file() {
            bail!("Model directory '{}' has no {}", dir.display(), name);
        }
        Ok(path)
    };
    Ok(ModelFiles {
        config:    require(CONFIG_FILE)?,
        tokenizer: require(TOKENIZER_FILE)?,
        weights:   require(WEIGHTS_FILE)?,
    })
}

fn resolve_hub(repo_id: &str, revision: &str) -> Result<ModelFiles> {
    tracing::info!("Fetching model '{}' (revision {}) from the HuggingFace Hub", repo_id, revision);

    let api  = Api::new().context("Cannot initialise the HuggingFace Hub client")?;
    let repo = api.repo(Repo::with_revision(
        repo_id.to_string(),
        RepoType::Model,
        revision.to_string(),
    ));

    let fetch = |name: &str| -> Result<PathBuf> {
        let path = repo
            .get(name)
            .with_context(|| format!("Cannot fetch '{name}' from '{repo_id}'"))?;
        tracing::debug!("{} -> {}", name, path.display());
        Ok(path)
    };

    Ok(ModelFiles {
        config:    fetch(CONFIG_FILE)?,
        tokenizer: fetch(TOKENIZER_FILE)?,
        weights:   fetch(WEIGHTS_FILE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_source_is_distilled_squad() {
        assert_eq!(
            ModelSource::default().to_string(),
            "distilbert-base-uncased-distilled-squad@main"
        );
    }

    #[test]
    fn test_local_dir_with_all_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in [CONFIG_FILE, TOKENIZER_FILE, WEIGHTS_FILE] {
            fs::write(dir.path().join(name), b"{}").unwrap();
        }

        let files = ModelSource::Local(dir.path().to_path_buf()).resolve().unwrap();
        assert_eq!(files.config, dir.path().join(CONFIG_FILE));
        assert_eq!(files.tokenizer, dir.path().join(TOKENIZER_FILE));
        assert_eq!(files.weights, dir.path().join(WEIGHTS_FILE));
    }

    #[test]
    fn test_local_dir_missing_weights() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), b"{}").unwrap();
        fs::write(dir.path().join(TOKENIZER_FILE), b"{}").unwrap();

        let err = ModelSource::Local(dir.path().to_path_buf()).resolve().unwrap_err();
        assert!(err.to_string().contains(WEIGHTS_FILE));
    }

    #[test]
    fn test_missing_local_dir() {
        let err = ModelSource::Local(PathBuf::from("/definitely/not/here"))
            .resolve()
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
