//! Ranking of scored sections.
//!
//! Sections are ordered by score, highest first. Equal scores are broken by
//! document id (byte-wise ascending) and then by detection order within the
//! document, so the result never depends on the order sections arrive in.
//! NaN scores sort below every real score.

use std::cmp::Ordering;

use crate::model::{Ranked, Scored};

/// Total order used by [`rank`]: `Less` means `a` ranks ahead of `b`.
pub fn compare(a: &Scored, b: &Scored) -> Ordering {
    sort_key(b.score)
        .total_cmp(&sort_key(a.score))
        .then_with(|| a.item.document_id.cmp(&b.item.document_id))
        .then_with(|| a.item.ordinal.cmp(&b.item.ordinal))
}

fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Sort the full scored set and assign dense ranks `1..=len`.
pub fn rank(mut scored: Vec<Scored>) -> Vec<Ranked> {
    scored.sort_by(compare);
    scored
        .into_iter()
        .enumerate()
        .map(|(i, s)| Ranked {
            item: s.item,
            score: s.score,
            rank: i as u32 + 1,
        })
        .collect()
}

/// Keep the `n` best-ranked sections. Must only be applied to the output of
/// [`rank`], so ranks stay `1..=n`.
pub fn take_top(mut ranked: Vec<Ranked>, n: usize) -> Vec<Ranked> {
    ranked.truncate(n);
    ranked
}
