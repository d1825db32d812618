//! Candle BERT backend for [`TextClassificationModel`].
//!
//! Loads a `BertForSequenceClassification` checkpoint from the HuggingFace
//! Hub: the BERT encoder, the pooler (dense + tanh over `[CLS]`) and the
//! linear classifier head. Requires the `bert` feature.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{linear, ops::softmax, Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use hf_hub::api::sync::{Api, ApiRepo};
use hf_hub::{Repo, RepoType};
use log::{info, warn};
use serde::Deserialize;
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::bert::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::Tokenizer;

use super::model::TextClassificationModel;
use crate::error::{Result, SentimentError};
use crate::sentiment::{PredictOptions, RawPrediction};

/// Fields of `config.json` the classifier head needs beyond the BERT config.
#[derive(Deserialize)]
struct ClassifierConfigJson {
    hidden_size: usize,
    #[serde(default)]
    id2label: HashMap<String, String>,
    #[serde(default)]
    num_labels: Option<usize>,
    #[serde(default = "default_max_positions")]
    max_position_embeddings: usize,
}

fn default_max_positions() -> usize {
    512
}

/// BERT sequence classifier running on candle.
pub struct BertSentimentModel {
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    cls_id: u32,
    sep_id: u32,
    max_positions: usize,
    device: Device,
    model_id: String,
}

impl BertSentimentModel {
    /// Download (or reuse the hub cache for) `model_id` and load it.
    ///
    /// Blocking: performs network and disk I/O.
    pub fn load(model_id: &str, use_cpu: bool) -> Result<Self> {
        let device = if use_cpu {
            Device::Cpu
        } else {
            Device::cuda_if_available(0)
                .map_err(|e| SentimentError::model_load(format!("Device setup failed: {e}")))?
        };
        info!("Loading model {model_id} on {device:?}");

        let api = Api::new().map_err(|e| {
            SentimentError::model_load(format!("Failed to initialize HuggingFace API: {e}"))
        })?;
        let repo = api.repo(Repo::new(model_id.to_owned(), RepoType::Model));

        let config_path = fetch(&repo, model_id, "config.json")?;
        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SentimentError::model_load(format!("Config read failed: {e}")))?;
        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| SentimentError::model_load(format!("Config parse failed: {e}")))?;
        let class_cfg: ClassifierConfigJson = serde_json::from_str(&config_str)
            .map_err(|e| SentimentError::model_load(format!("Config parse failed: {e}")))?;

        let labels = label_names(&class_cfg);
        let vb = load_weights(&repo, model_id, &device)?;

        let bert = BertModel::load(vb.pp("bert"), &config)
            .map_err(|e| SentimentError::model_load(format!("Model load failed: {e}")))?;
        let pooler = linear(
            class_cfg.hidden_size,
            class_cfg.hidden_size,
            vb.pp("bert.pooler.dense"),
        )
        .map_err(|e| SentimentError::model_load(format!("Pooler load failed: {e}")))?;
        let classifier = linear(class_cfg.hidden_size, labels.len(), vb.pp("classifier"))
            .map_err(|e| SentimentError::model_load(format!("Classifier head load failed: {e}")))?;

        let tokenizer = load_tokenizer(&repo, model_id)?;
        let cls_id = special_token(&tokenizer, "[CLS]")?;
        let sep_id = special_token(&tokenizer, "[SEP]")?;

        info!("Model {model_id} loaded with labels {labels:?}");

        Ok(Self {
            bert,
            pooler,
            classifier,
            tokenizer,
            labels,
            cls_id,
            sep_id,
            max_positions: class_cfg.max_position_embeddings,
            device,
            model_id: model_id.to_owned(),
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Token ids wrapped in `[CLS]`/`[SEP]`, truncated to `max_length` when requested.
    fn encode(&self, text: &str, options: &PredictOptions) -> Result<Vec<u32>> {
        let encoding = self.tokenizer.encode(text, false).map_err(|e| {
            SentimentError::processing(format!(
                "Tokenization failed on '{}': {e}",
                text.chars().take(50).collect::<String>()
            ))
        })?;

        frame_ids(
            encoding.get_ids().to_vec(),
            self.cls_id,
            self.sep_id,
            options,
            self.max_positions,
        )
    }
}

impl TextClassificationModel for BertSentimentModel {
    fn predict(&self, text: &str, options: &PredictOptions) -> Result<RawPrediction> {
        let ids = self.encode(text, options)?;

        let input_ids = Tensor::new(ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask = input_ids.ones_like()?;

        let hidden = self
            .bert
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let cls = hidden.i((.., 0))?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        let logits = self.classifier.forward(&pooled)?;

        let probs = softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;
        let (label, score) = best_label(&probs, &self.labels)?;

        Ok(RawPrediction { label, score })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Wrap `body` in `[CLS]`/`[SEP]`, truncated so the framed sequence fits
/// `max_length` when truncation is on. Sequences over `max_positions` fail.
fn frame_ids(
    mut body: Vec<u32>,
    cls: u32,
    sep: u32,
    options: &PredictOptions,
    max_positions: usize,
) -> Result<Vec<u32>> {
    if options.truncation {
        body.truncate(options.max_length.saturating_sub(2));
    }

    let mut ids = Vec::with_capacity(body.len() + 2);
    ids.push(cls);
    ids.extend(body);
    ids.push(sep);

    if ids.len() > max_positions {
        return Err(SentimentError::processing(format!(
            "Input is {} tokens, longer than the model maximum of {}",
            ids.len(),
            max_positions
        )));
    }
    Ok(ids)
}

/// Highest-probability class and its label. Ties go to the lower index.
fn best_label(probs: &[f32], labels: &[String]) -> Result<(String, f32)> {
    let (best, score) = probs
        .iter()
        .copied()
        .enumerate()
        .fold(None, |acc: Option<(usize, f32)>, (i, p)| match acc {
            Some((_, top)) if top >= p => acc,
            _ => Some((i, p)),
        })
        .ok_or_else(|| SentimentError::processing("Model returned no logits"))?;

    let label = labels
        .get(best)
        .cloned()
        .unwrap_or_else(|| format!("LABEL_{best}"));
    Ok((label, score))
}

fn fetch(repo: &ApiRepo, model_id: &str, filename: &str) -> Result<PathBuf> {
    repo.get(filename).map_err(|e| {
        SentimentError::model_load(format!(
            "Failed to download '{filename}' from '{model_id}': {e}"
        ))
    })
}

/// Label names indexed by class id, from `id2label` when present.
fn label_names(cfg: &ClassifierConfigJson) -> Vec<String> {
    let count = cfg
        .num_labels
        .unwrap_or(0)
        .max(cfg.id2label.len())
        .max(1);
    (0..count)
        .map(|i| {
            cfg.id2label
                .get(&i.to_string())
                .cloned()
                .unwrap_or_else(|| format!("LABEL_{i}"))
        })
        .collect()
}

/// Prefer safetensors; fall back to the PyTorch checkpoint.
fn load_weights(repo: &ApiRepo, model_id: &str, device: &Device) -> Result<VarBuilder<'static>> {
    if let Ok(path) = repo.get("model.safetensors") {
        let tensors = candle_core::safetensors::load(&path, device)
            .map_err(|e| SentimentError::model_load(format!("Weights load failed: {e}")))?;
        return Ok(VarBuilder::from_tensors(tensors, DType::F32, device));
    }

    let path = fetch(repo, model_id, "pytorch_model.bin")?;
    VarBuilder::from_pth(&path, DType::F32, device)
        .map_err(|e| SentimentError::model_load(format!("Weights load failed: {e}")))
}

/// Prefer `tokenizer.json`; older BERT repos only ship `vocab.txt`.
fn load_tokenizer(repo: &ApiRepo, model_id: &str) -> Result<Tokenizer> {
    if let Ok(path) = repo.get("tokenizer.json") {
        return Tokenizer::from_file(&path).map_err(|e| {
            SentimentError::model_load(format!(
                "Failed to load tokenizer from '{}': {e}",
                path.display()
            ))
        });
    }

    warn!("{model_id} has no tokenizer.json, building WordPiece from vocab.txt");
    let vocab_path = fetch(repo, model_id, "vocab.txt")?;
    wordpiece_tokenizer(&vocab_path)
}

fn wordpiece_tokenizer(vocab_path: &Path) -> Result<Tokenizer> {
    let wordpiece = WordPiece::from_file(&vocab_path.to_string_lossy())
        .unk_token("[UNK]".to_owned())
        .build()
        .map_err(|e| SentimentError::model_load(format!("Vocabulary load failed: {e}")))?;

    let mut tokenizer = Tokenizer::new(wordpiece);
    tokenizer
        .with_normalizer(Some(BertNormalizer::default()))
        .with_pre_tokenizer(Some(BertPreTokenizer));
    Ok(tokenizer)
}

fn special_token(tokenizer: &Tokenizer, token: &str) -> Result<u32> {
    tokenizer
        .token_to_id(token)
        .ok_or_else(|| SentimentError::model_load(format!("Tokenizer has no {token} token")))
}
