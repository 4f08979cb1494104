// ============================================================
// Layer 3 — Answer Span Selection
// ============================================================
// The model scores every token twice: how likely it is to be
// the FIRST token of the answer and how likely it is to be the
// LAST one. Turning two score vectors into one span can be done
// two ways:
//
//   Independent — argmax of each vector on its own. Cheap, but
//                 end can land before start, which yields an
//                 empty (degenerate) answer.
//
//   Joint       — best start[i] + end[j] with i <= j and a
//                 bounded span length, restricted to context
//                 tokens. Never degenerate; no span at all when
//                 the encoding has no context tokens.
//
// Independent is the default. Joint must be asked for.

use serde::Serialize;

use crate::domain::encoding::{EncodedPair, SpanLogits};
use crate::domain::error::{QaError, QaResult};

/// Default upper bound on a joint span, in tokens
pub const DEFAULT_MAX_ANSWER_LEN: usize = 30;

/// A pair of token indices into the encoded sequence (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerSpan {
    pub start: usize,
    pub end:   usize,
}

impl AnswerSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// End before start: the span selects no tokens.
    pub fn is_degenerate(&self) -> bool {
        self.end < self.start
    }

    /// Number of tokens covered; zero for a degenerate span.
    pub fn len(&self) -> usize {
        if self.is_degenerate() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The ids covered by this span, `ids[start..=end]`.
    /// Degenerate or out-of-range spans give an empty slice.
    pub fn slice<'a>(&self, ids: &'a [u32]) -> &'a [u32] {
        if self.is_degenerate() || self.start >= ids.len() {
            return &[];
        }
        let end = self.end.min(ids.len() - 1);
        &ids[self.start..=end]
    }
}

/// How to turn start/end logits into a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanStrategy {
    /// Argmax of each vector separately
    #[default]
    Independent,
    /// Best valid span by summed logits
    Joint { max_answer_len: usize },
}

/// A chosen span together with its summed logit score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredSpan {
    pub span:  AnswerSpan,
    pub score: f32,
}

/// Index of the maximum value; the first one wins on ties.
/// NaN never beats anything. Returns None for an empty or all-NaN slice.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, best_v)) if v <= best_v => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

impl SpanStrategy {
    /// Pick a span from the scorer output for the given encoding.
    ///
    /// `Ok(None)` means the joint search found no candidate span: the
    /// encoding holds no context tokens, or every candidate scored NaN.
    /// Independent selection always returns a span.
    pub fn select(
        &self,
        encoded: &EncodedPair,
        logits:  &SpanLogits,
    ) -> QaResult<Option<ScoredSpan>> {
        check_lengths(encoded, logits)?;
        match *self {
            SpanStrategy::Independent => select_independent(logits).map(Some),
            SpanStrategy::Joint { max_answer_len } => {
                select_joint(encoded, logits, max_answer_len)
            }
        }
    }
}

fn check_lengths(encoded: &EncodedPair, logits: &SpanLogits) -> QaResult<()> {
    let tokens = encoded.len();
    let start  = logits.start_logits.len();
    let end    = logits.end_logits.len();
    if start == 0 || end == 0 {
        return Err(QaError::EmptyScores);
    }
    if start != tokens || end != tokens {
        return Err(QaError::ScoreLengthMismatch { tokens, start, end });
    }
    Ok(())
}

fn select_independent(logits: &SpanLogits) -> QaResult<ScoredSpan> {
    let start = argmax(&logits.start_logits).ok_or(QaError::EmptyScores)?;
    let end   = argmax(&logits.end_logits).ok_or(QaError::EmptyScores)?;
    Ok(ScoredSpan {
        span:  AnswerSpan::new(start, end),
        score: logits.start_logits[start] + logits.end_logits[end],
    })
}

fn select_joint(
    encoded:        &EncodedPair,
    logits:         &SpanLogits,
    max_answer_len: usize,
) -> QaResult<Option<ScoredSpan>> {
    let seq_len = encoded.len();
    let max_len = max_answer_len.max(1);

    let mut best: Option<ScoredSpan> = None;
    for s in (0..seq_len).filter(|&s| encoded.is_context(s)) {
        let start_score = logits.start_logits[s];
        if start_score.is_nan() {
            continue;
        }
        for e in s..s.saturating_add(max_len).min(seq_len) {
            // A span may not run past the end of the context
            if !encoded.is_context(e) {
                break;
            }
            let score = start_score + logits.end_logits[e];
            if score.is_nan() {
                continue;
            }
            if best.map_or(true, |b| score > b.score) {
                best = Some(ScoredSpan { span: AnswerSpan::new(s, e), score });
            }
        }
    }

    Ok(best)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn logits(start: &[f32], end: &[f32]) -> SpanLogits {
        SpanLogits::new(start.to_vec(), end.to_vec())
    }

    #[test]
    fn test_argmax_first_index_wins_ties() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[5.0, 5.0, 5.0]), Some(0));
    }

    #[test]
    fn test_argmax_skips_nan() {
        assert_eq!(argmax(&[f32::NAN, 0.5, 0.1]), Some(1));
        assert_eq!(argmax(&[f32::NAN, f32::NAN]), None);
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_argmax_handles_negative_infinity() {
        assert_eq!(argmax(&[f32::NEG_INFINITY, f32::NEG_INFINITY]), Some(0));
    }

    #[test]
    fn test_span_slice_inclusive() {
        let ids = [10, 11, 12, 13, 14];
        assert_eq!(AnswerSpan::new(1, 3).slice(&ids), &[11, 12, 13]);
        assert_eq!(AnswerSpan::new(2, 2).slice(&ids), &[12]);
    }

    #[test]
    fn test_degenerate_span_is_empty() {
        let span = AnswerSpan::new(3, 1);
        assert!(span.is_degenerate());
        assert_eq!(span.len(), 0);
        assert!(span.slice(&[1, 2, 3, 4]).is_empty());
    }

    #[test]
    fn test_out_of_range_span_is_clamped() {
        let ids = [1, 2, 3];
        assert_eq!(AnswerSpan::new(1, 10).slice(&ids), &[2, 3]);
        assert!(AnswerSpan::new(5, 6).slice(&ids).is_empty());
    }

    #[test]
    fn test_independent_picks_each_argmax() {
        let enc = EncodedPair::from_ids(vec![0; 5]);
        let l   = logits(&[0.0, 4.0, 1.0, 0.0, 0.0], &[0.0, 0.0, 1.0, 6.0, 0.0]);
        let chosen = SpanStrategy::Independent.select(&enc, &l).unwrap().unwrap();
        assert_eq!(chosen.span, AnswerSpan::new(1, 3));
        assert_eq!(chosen.score, 10.0);
    }

    #[test]
    fn test_independent_can_be_degenerate() {
        let enc = EncodedPair::from_ids(vec![0; 4]);
        let l   = logits(&[0.0, 0.0, 0.0, 9.0], &[9.0, 0.0, 0.0, 0.0]);
        let chosen = SpanStrategy::Independent.select(&enc, &l).unwrap().unwrap();
        assert_eq!(chosen.span, AnswerSpan::new(3, 0));
        assert!(chosen.span.is_degenerate());
    }

    #[test]
    fn test_joint_never_degenerate() {
        let enc = EncodedPair::from_ids(vec![0; 4]);
        let l   = logits(&[0.0, 0.0, 0.0, 9.0], &[9.0, 0.0, 0.0, 0.0]);
        let chosen = SpanStrategy::Joint { max_answer_len: 30 }.select(&enc, &l).unwrap().unwrap();
        assert!(!chosen.span.is_degenerate());
        // (0, 0) and (3, 3) both score 9; the first pair found wins
        assert_eq!(chosen.span, AnswerSpan::new(0, 0));
        assert_eq!(chosen.score, 9.0);
    }

    #[test]
    fn test_joint_respects_max_answer_len() {
        let enc = EncodedPair::from_ids(vec![0; 6]);
        let l   = logits(&[5.0, -9.0, -9.0, -9.0, -9.0, -9.0], &[0.0, 1.0, 0.0, 0.0, 0.0, 8.0]);
        let chosen = SpanStrategy::Joint { max_answer_len: 3 }.select(&enc, &l).unwrap().unwrap();
        // 0..=5 would score 13 but is 6 tokens long
        assert_eq!(chosen.span, AnswerSpan::new(0, 1));
    }

    #[test]
    fn test_joint_restricted_to_context_tokens() {
        let mut enc = EncodedPair::from_ids(vec![101, 7, 102, 20, 21, 102]);
        enc.sequence_ids = vec![None, Some(0), None, Some(1), Some(1), None];
        // The CLS token and the question carry the highest scores
        let l = logits(&[9.0, 8.0, 0.0, 2.0, 1.0, 0.0], &[9.0, 8.0, 0.0, 1.0, 3.0, 7.0]);
        let chosen = SpanStrategy::Joint { max_answer_len: 30 }.select(&enc, &l).unwrap().unwrap();
        assert_eq!(chosen.span, AnswerSpan::new(3, 4));
    }

    #[test]
    fn test_joint_without_context_tokens_has_no_span() {
        // [CLS] q [SEP] [SEP]: the context normalised away to nothing,
        // and the unconstrained argmax would put end before start
        let mut enc = EncodedPair::from_ids(vec![101, 7, 102, 102]);
        enc.sequence_ids = vec![None, Some(0), None, None];
        let l = logits(&[0.0, 0.0, 6.0, 0.0], &[0.0, 6.0, 0.0, 0.0]);

        let chosen = SpanStrategy::Joint { max_answer_len: 30 }.select(&enc, &l).unwrap();
        assert_eq!(chosen, None);

        let reference = SpanStrategy::Independent.select(&enc, &l).unwrap().unwrap();
        assert!(reference.span.is_degenerate());
    }

    #[test]
    fn test_joint_unbounded_answer_len() {
        let enc = EncodedPair::from_ids(vec![0; 4]);
        let l   = logits(&[0.0, 1.0, 0.0, 0.0], &[0.0, 0.0, 2.0, 0.0]);
        let chosen = SpanStrategy::Joint { max_answer_len: usize::MAX }
            .select(&enc, &l)
            .unwrap()
            .unwrap();
        assert_eq!(chosen.span, AnswerSpan::new(1, 2));
        assert_eq!(chosen.score, 3.0);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let enc = EncodedPair::from_ids(vec![0; 3]);
        let l   = logits(&[0.0, 1.0], &[0.0, 1.0, 2.0]);
        let err = SpanStrategy::Independent.select(&enc, &l).unwrap_err();
        assert!(matches!(err, QaError::ScoreLengthMismatch { tokens: 3, start: 2, end: 3 }));
    }

    #[test]
    fn test_empty_scores_is_an_error() {
        let enc = EncodedPair::default();
        let err = SpanStrategy::Independent.select(&enc, &SpanLogits::default()).unwrap_err();
        assert!(matches!(err, QaError::EmptyScores));
    }
}
