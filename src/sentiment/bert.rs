use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use candle_core::{D, DType, Device, IndexOp, Result, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;

/// Classification-head fields of a Hugging Face `config.json`.
#[derive(Debug, Default, Deserialize)]
struct HeadConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
    #[serde(default)]
    num_labels: Option<usize>,
}

impl HeadConfig {
    fn labels(&self) -> Vec<String> {
        let count = self
            .num_labels
            .unwrap_or(self.id2label.len())
            .max(self.id2label.len())
            .max(2);

        (0..count)
            .map(|i| {
                self.id2label
                    .get(&i.to_string())
                    .cloned()
                    .unwrap_or_else(|| format!("LABEL_{i}"))
            })
            .collect()
    }
}

struct BertForSequenceClassificationImpl {
    bert: BertModel,
    pooler: Option<Linear>,
    classifier: Linear,
}

impl BertForSequenceClassificationImpl {
    fn load(vb: VarBuilder, config: &Config, num_labels: usize) -> Result<Self> {
        let encoder_vb = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            vb.pp("bert")
        } else {
            vb.clone()
        };

        let bert = BertModel::load(encoder_vb.clone(), config)?;

        let pooler = if encoder_vb.contains_tensor("pooler.dense.weight") {
            Some(candle_nn::linear(
                config.hidden_size,
                config.hidden_size,
                encoder_vb.pp("pooler").pp("dense"),
            )?)
        } else {
            None
        };

        let classifier = candle_nn::linear(config.hidden_size, num_labels, vb.pp("classifier"))?;

        Ok(Self {
            bert,
            pooler,
            classifier,
        })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;

        let pooled = match &self.pooler {
            Some(dense) => dense.forward(&cls_token)?.tanh()?,
            None => cls_token,
        };

        self.classifier.forward(&pooled)
    }
}

/// BERT encoder with a pooled linear classification head (`num_labels` outputs).
#[derive(Clone)]
pub struct BertSequenceClassifier {
    inner: Arc<BertForSequenceClassificationImpl>,
    labels: Arc<[String]>,
}

impl BertSequenceClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle_core::Error::Msg(format!("Failed to parse config: {}", e)))?;
        let head: HeadConfig = serde_json::from_str(&config_content)
            .map_err(|e| candle_core::Error::Msg(format!("Failed to parse label map: {}", e)))?;
        let labels = head.labels();

        // SAFETY: the safetensors file is mapped read-only and not modified while loaded.
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = BertForSequenceClassificationImpl::load(vb, &config, labels.len())?;

        Ok(Self {
            inner: Arc::new(model),
            labels: labels.into(),
        })
    }

    /// Class probabilities, shape `[batch, num_labels]`.
    pub fn probabilities(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let logits = self
            .inner
            .forward(input_ids, token_type_ids, attention_mask)?;
        candle_nn::ops::softmax(&logits, D::Minus1)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_from_id2label() {
        let head: HeadConfig = serde_json::from_str(
            r#"{"id2label": {"0": "NEGATIVE", "1": "POSITIVE"}, "num_labels": 2}"#,
        )
        .unwrap();
        assert_eq!(head.labels(), vec!["NEGATIVE", "POSITIVE"]);
    }

    #[test]
    fn test_labels_default_names() {
        let head: HeadConfig = serde_json::from_str(r#"{"hidden_size": 768}"#).unwrap();
        assert_eq!(head.labels(), vec!["LABEL_0", "LABEL_1"]);
    }

    #[test]
    fn test_labels_fill_gaps() {
        let head: HeadConfig =
            serde_json::from_str(r#"{"id2label": {"1": "긍정"}, "num_labels": 3}"#).unwrap();
        assert_eq!(head.labels(), vec!["LABEL_0", "긍정", "LABEL_2"]);
    }
}
