// ============================================================
// Layer 5 — DistilBERT Question Answering Model
// ============================================================
// A 6-layer distilled BERT encoder with a span head on top,
// laid out so its parameter names line up with the PyTorch
// checkpoints published on the HuggingFace Hub:
//
//   distilbert.embeddings.{word_embeddings, position_embeddings, layer_norm}
//   distilbert.transformer.layer.N.attention.{query, key, value, output}
//   distilbert.transformer.layer.N.{sa_layer_norm, output_layer_norm}
//   distilbert.transformer.layer.N.ffn.{lin1, lin2}
//   qa_outputs
//
// (checkpoint.rs remaps the few PyTorch names that differ.)
//
// Each block is post-LayerNorm:
//   x = LN(x + Attention(x))
//   x = LN(x + Linear(GELU(Linear(x))))
//
// Reference: Sanh et al. (2019) DistilBERT
//            Devlin et al. (2019) BERT

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

#[derive(Config, Debug)]
pub struct DistilBertQaConfig {
    pub vocab_size:              usize,
    pub max_position_embeddings: usize,
    pub dim:                     usize,
    pub n_layers:                usize,
    pub n_heads:                 usize,
    pub hidden_dim:              usize,
    #[config(default = 0.0)]
    pub dropout:                 f64,
    #[config(default = 1e-12)]
    pub layer_norm_eps:          f64,
}

impl DistilBertQaConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> DistilBertQaModel<B> {
        let embeddings = Embeddings {
            word_embeddings:     EmbeddingConfig::new(self.vocab_size, self.dim).init(device),
            position_embeddings: EmbeddingConfig::new(self.max_position_embeddings, self.dim)
                .init(device),
            layer_norm: self.layer_norm(device),
            dropout:    DropoutConfig::new(self.dropout).init(),
        };
        let layer: Vec<TransformerBlock<B>> = (0..self.n_layers)
            .map(|_| self.build_block(device))
            .collect();

        DistilBertQaModel {
            distilbert: DistilBertEncoder {
                embeddings,
                transformer: Transformer { layer },
            },
            qa_outputs: LinearConfig::new(self.dim, 2).init(device),
            max_position_embeddings: self.max_position_embeddings,
        }
    }

    fn build_block<B: Backend>(&self, device: &B::Device) -> TransformerBlock<B> {
        let attention = MultiHeadAttentionConfig::new(self.dim, self.n_heads)
            .with_dropout(self.dropout)
            .init(device);
        let ffn = FeedForward {
            lin1:    LinearConfig::new(self.dim, self.hidden_dim).init(device),
            lin2:    LinearConfig::new(self.hidden_dim, self.dim).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
        };
        TransformerBlock {
            attention,
            sa_layer_norm:     self.layer_norm(device),
            ffn,
            output_layer_norm: self.layer_norm(device),
        }
    }

    fn layer_norm<B: Backend>(&self, device: &B::Device) -> LayerNorm<B> {
        LayerNormConfig::new(self.dim)
            .with_epsilon(self.layer_norm_eps)
            .init(device)
    }
}

#[derive(Module, Debug)]
pub struct Embeddings<B: Backend> {
    pub word_embeddings:     Embedding<B>,
    pub position_embeddings: Embedding<B>,
    pub layer_norm:          LayerNorm<B>,
    pub dropout:             Dropout,
}

impl<B: Backend> Embeddings<B> {
    /// input_ids: [batch, seq_len] → [batch, seq_len, dim]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = input_ids.dims();
        let device = input_ids.device();

        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &device)
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);

        let x = self.word_embeddings.forward(input_ids)
            + self.position_embeddings.forward(positions);
        self.dropout.forward(self.layer_norm.forward(x))
    }
}

#[derive(Module, Debug)]
pub struct FeedForward<B: Backend> {
    pub lin1:    Linear<B>,
    pub lin2:    Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> FeedForward<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let x = burn::tensor::activation::gelu(self.lin1.forward(x));
        self.dropout.forward(self.lin2.forward(x))
    }
}

#[derive(Module, Debug)]
pub struct TransformerBlock<B: Backend> {
    pub attention:         MultiHeadAttention<B>,
    pub sa_layer_norm:     LayerNorm<B>,
    pub ffn:               FeedForward<B>,
    pub output_layer_norm: LayerNorm<B>,
}

impl<B: Backend> TransformerBlock<B> {
    /// padding_mask: [batch, seq_len], true where the token is padding
    pub fn forward(&self, x: Tensor<B, 3>, padding_mask: Tensor<B, 2, Bool>) -> Tensor<B, 3> {
        let attn = self
            .attention
            .forward(MhaInput::self_attn(x.clone()).mask_pad(padding_mask))
            .context;
        let x = self.sa_layer_norm.forward(x + attn);
        let ffn_out = self.ffn.forward(x.clone());
        self.output_layer_norm.forward(x + ffn_out)
    }
}

#[derive(Module, Debug)]
pub struct Transformer<B: Backend> {
    pub layer: Vec<TransformerBlock<B>>,
}

#[derive(Module, Debug)]
pub struct DistilBertEncoder<B: Backend> {
    pub embeddings:  Embeddings<B>,
    pub transformer: Transformer<B>,
}

impl<B: Backend> DistilBertEncoder<B> {
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> Tensor<B, 3> {
        let padding_mask = attention_mask.equal_elem(0);
        let mut x = self.embeddings.forward(input_ids);
        for block in &self.transformer.layer {
            x = block.forward(x, padding_mask.clone());
        }
        x
    }
}

#[derive(Module, Debug)]
pub struct DistilBertQaModel<B: Backend> {
    pub distilbert:              DistilBertEncoder<B>,
    pub qa_outputs:              Linear<B>,
    pub max_position_embeddings: usize,
}

pub struct QaModelOutput<B: Backend> {
    pub start_logits: Tensor<B, 2>,
    pub end_logits:   Tensor<B, 2>,
}

impl<B: Backend> DistilBertQaModel<B> {
    /// input_ids, attention_mask: [batch, seq_len] → start_logits, end_logits: [batch, seq_len]
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> QaModelOutput<B> {
        let [batch_size, seq_len] = input_ids.dims();

        let hidden = self.distilbert.forward(input_ids, attention_mask);

        // Two logits per token, split into start / end
        let logits = self.qa_outputs.forward(hidden); // [batch, seq_len, 2]
        let start_logits = logits.clone()
            .slice([0..batch_size, 0..seq_len, 0..1])
            .reshape([batch_size, seq_len]);
        let end_logits = logits
            .slice([0..batch_size, 0..seq_len, 1..2])
            .reshape([batch_size, seq_len]);

        QaModelOutput { start_logits, end_logits }
    }
}
