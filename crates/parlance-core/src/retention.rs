//! Retention rule: when does an agent give up on a word?
//!
//! Every use of a word appends its outcome (0.0 or 1.0) to the word's
//! history. Once the history holds `change_rate` outcomes the word is
//! judged on the mean `avg`:
//!
//! - `avg == 0`: always dropped
//! - `avg == 1`: always kept
//! - otherwise dropped with probability
//!   `1 / (1 + exp(4 · tan(radians(beta · (avg − alpha)))))`
//!
//! The tangent diverges as its argument reaches ±90°. The angle is
//! clamped to [-90°, 90°] and the resulting probability clamped to
//! [0, 1], so the rule saturates to "always keep" / "always drop"
//! instead of producing NaN or wrapping around.

use serde::{Deserialize, Serialize};

/// Largest angle, in degrees, fed to the tangent.
const MAX_ANGLE_DEGREES: f64 = 90.0;

/// Decision for a word's outcome history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Fewer than `change_rate` observations; keep observing.
    Pending,
    /// Keep the coupling and restart its history.
    Keep,
    /// Delete the coupling.
    Drop,
}

/// The sigmoid-derived drop/keep rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetentionRule {
    pub change_rate: usize,
    pub alpha: f64,
    pub beta: f64,
}

impl RetentionRule {
    pub fn new(change_rate: usize, alpha: f64, beta: f64) -> Self {
        Self {
            change_rate,
            alpha,
            beta,
        }
    }

    /// Whether a history of this length is ready to be judged.
    pub fn is_due(&self, observations: usize) -> bool {
        observations >= self.change_rate
    }

    /// Probability that a word with mean success `avg` is dropped.
    pub fn drop_probability(&self, avg: f64) -> f64 {
        if avg <= 0.0 {
            return 1.0;
        }
        if avg >= 1.0 {
            return 0.0;
        }
        let degrees = (self.beta * (avg - self.alpha)).clamp(-MAX_ANGLE_DEGREES, MAX_ANGLE_DEGREES);
        let exponent = 4.0 * degrees.to_radians().tan();
        let probability = 1.0 / (1.0 + exponent.exp());
        if probability.is_nan() {
            return if exponent > 0.0 { 0.0 } else { 1.0 };
        }
        probability.clamp(0.0, 1.0)
    }

    /// Probability that a word with mean success `avg` survives judgement.
    pub fn keep_probability(&self, avg: f64) -> f64 {
        1.0 - self.drop_probability(avg)
    }

    /// Judge an outcome history.
    ///
    /// `draw` supplies a uniform sample in [0, 1) and is only called when
    /// the decision is actually stochastic, so deterministic verdicts do
    /// not consume randomness.
    pub fn judge(&self, history: &[f64], draw: impl FnOnce() -> f64) -> Verdict {
        if !self.is_due(history.len()) {
            return Verdict::Pending;
        }
        let avg = mean(history);
        if avg == 0.0 {
            return Verdict::Drop;
        }
        if avg == 1.0 {
            return Verdict::Keep;
        }
        if draw() < self.drop_probability(avg) {
            Verdict::Drop
        } else {
            Verdict::Keep
        }
    }
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
