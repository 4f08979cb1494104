// ============================================================
// Layer 3 — Encoded Pair and Span Logits
// ============================================================
// The joint encoding of a question/context pair looks like:
//
//   [CLS] what is the capital ? [SEP] paris is the capital ... [SEP]
//     0    1   2   3     4     5   6    7    8   9   10        n-1
//
// The ordering convention belongs to the tokenizer; this layer
// treats the ids and auxiliary vectors as opaque and only uses
// `sequence_ids` to know which positions came from the context.

use serde::Serialize;

/// One question/context pair after tokenisation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedPair {
    /// Token ids of the joint sequence
    pub input_ids: Vec<u32>,

    /// 1 for real tokens, 0 for padding
    pub attention_mask: Vec<u32>,

    /// Segment ids (0 = question, 1 = context); unused by DistilBERT
    pub type_ids: Vec<u32>,

    /// Which input sequence produced each token:
    /// `Some(0)` question, `Some(1)` context, `None` special token.
    /// Empty when the encoder does not track it.
    pub sequence_ids: Vec<Option<usize>>,
}

impl EncodedPair {
    /// Build an encoding with a full attention mask and no segment info.
    pub fn from_ids(input_ids: Vec<u32>) -> Self {
        let len = input_ids.len();
        Self {
            input_ids,
            attention_mask: vec![1; len],
            type_ids:       vec![0; len],
            sequence_ids:   Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// True when `position` holds a context token.
    /// Without sequence ids every position counts as context.
    pub fn is_context(&self, position: usize) -> bool {
        if self.sequence_ids.is_empty() {
            return position < self.input_ids.len();
        }
        matches!(self.sequence_ids.get(position), Some(Some(1)))
    }
}

/// Start/end scores, one value per token position.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpanLogits {
    pub start_logits: Vec<f32>,
    pub end_logits:   Vec<f32>,
}

impl SpanLogits {
    pub fn new(start_logits: Vec<f32>, end_logits: Vec<f32>) -> Self {
        Self { start_logits, end_logits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ids_masks_every_token() {
        let enc = EncodedPair::from_ids(vec![101, 7, 8, 102]);
        assert_eq!(enc.attention_mask, vec![1, 1, 1, 1]);
        assert_eq!(enc.len(), 4);
        assert!(!enc.is_empty());
    }

    #[test]
    fn test_is_context_uses_sequence_ids() {
        let mut enc = EncodedPair::from_ids(vec![101, 7, 102, 9, 10, 102]);
        enc.sequence_ids = vec![None, Some(0), None, Some(1), Some(1), None];

        assert!(!enc.is_context(0));
        assert!(!enc.is_context(1));
        assert!(enc.is_context(3));
        assert!(enc.is_context(4));
        assert!(!enc.is_context(5));
        assert!(!enc.is_context(99));
    }

    #[test]
    fn test_is_context_without_sequence_ids() {
        let enc = EncodedPair::from_ids(vec![1, 2, 3]);
        assert!(enc.is_context(0));
        assert!(enc.is_context(2));
        assert!(!enc.is_context(3));
    }
}
