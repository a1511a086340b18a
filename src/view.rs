//! Presentational state for the result panel.
//!
//! Everything the page template needs is computed here so the template only
//! has to interpolate strings.

use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;

use crate::scoring::{PredictResponse, ScoringError};
use crate::transaction::ValidationError;

/// Confidence above which a legitimate result gets the particle burst.
pub const CELEBRATION_CONFIDENCE: f64 = 90.0;

pub const PARTICLE_COUNT: usize = 20;
pub const PARTICLE_COLORS: [&str; 3] = ["#00D4FF", "#0066FF", "#10B981"];

const FRAUD_MESSAGE: &str = "This transaction shows suspicious patterns. We recommend additional verification steps before proceeding with this transaction.";
const SAFE_MESSAGE: &str = "This transaction passed our fraud detection analysis. No suspicious patterns were identified based on the provided information.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Danger,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Danger => "danger",
        }
    }

    pub fn color_var(self) -> &'static str {
        match self {
            Tone::Success => "var(--success)",
            Tone::Danger => "var(--danger)",
        }
    }
}

/// A labelled percentage with the width its bar should be drawn at.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Meter {
    pub text: String,
    pub width: f64,
}

impl Meter {
    pub fn from_percent(value: f64) -> Self {
        Self {
            text: format!("{}%", one_decimal(value)),
            width: bar_width(value),
        }
    }
}

/// Exact ties round away from zero. `{:.1}` alone would send 87.25 to "87.2".
fn one_decimal(value: f64) -> String {
    // A double sits exactly on a tie only when it is an odd number of quarters.
    let quarters = value * 4.0;
    if quarters.is_finite() && quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

fn bar_width(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Particle {
    pub color: &'static str,
    pub delay_ms: u64,
    pub angle: f64,
    pub velocity: f64,
    pub duration_ms: u64,
}

impl Particle {
    /// Horizontal and vertical travel in px at the end of the animation.
    pub fn offset(&self) -> (f64, f64) {
        (self.angle.cos() * self.velocity, self.angle.sin() * self.velocity)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticleBurst {
    pub particles: Vec<Particle>,
}

impl ParticleBurst {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|i| Particle {
                color: PARTICLE_COLORS[rng.gen_range(0..PARTICLE_COLORS.len())],
                delay_ms: i as u64 * 50,
                angle: rng.gen_range(0.0..TAU),
                velocity: rng.gen_range(100.0..200.0),
                duration_ms: rng.gen_range(1000..1500),
            })
            .collect();
        Self { particles }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultView {
    pub is_fraud: bool,
    pub icon: &'static str,
    pub tone: Tone,
    pub title: &'static str,
    pub message: &'static str,
    pub confidence: Meter,
    pub fraud: Meter,
    pub safe: Meter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebration: Option<ParticleBurst>,
}

impl ResultView {
    pub fn from_response(response: &PredictResponse) -> Self {
        Self::with_rng(response, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng>(response: &PredictResponse, rng: &mut R) -> Self {
        let (icon, tone, title, message) = if response.is_fraud {
            ("⚠️", Tone::Danger, "High Fraud Risk Detected", FRAUD_MESSAGE)
        } else {
            ("✅", Tone::Success, "Transaction Appears Safe", SAFE_MESSAGE)
        };

        let celebration = (!response.is_fraud && response.confidence > CELEBRATION_CONFIDENCE)
            .then(|| ParticleBurst::generate(rng));

        Self {
            is_fraud: response.is_fraud,
            icon,
            tone,
            title,
            message,
            confidence: Meter::from_percent(response.confidence),
            fraud: Meter::from_percent(response.fraud_probability),
            safe: Meter::from_percent(response.legitimate_probability),
            celebration,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorView {
    pub icon: &'static str,
    pub tone: Tone,
    pub title: &'static str,
    pub message: String,
}

impl ErrorView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            icon: "❌",
            tone: Tone::Danger,
            title: "Error",
            message: message.into(),
        }
    }
}

impl From<&ValidationError> for ErrorView {
    fn from(err: &ValidationError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<&ScoringError> for ErrorView {
    fn from(err: &ScoringError) -> Self {
        Self::new(err.to_string())
    }
}

/// What the result section currently shows. Metrics and report actions
/// only render for `Result`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Panel {
    #[default]
    Empty,
    Result(ResultView),
    Error(ErrorView),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn response(is_fraud: bool, confidence: f64, fraud: f64) -> PredictResponse {
        PredictResponse {
            is_fraud,
            confidence,
            fraud_probability: fraud,
            legitimate_probability: 100.0 - fraud,
            prediction: None,
        }
    }

    #[test]
    fn fraud_result_uses_danger_styling() {
        let view = ResultView::from_response(&response(true, 81.234, 81.234));
        assert_eq!(view.icon, "⚠️");
        assert_eq!(view.tone, Tone::Danger);
        assert_eq!(view.tone.css_class(), "danger");
        assert_eq!(view.title, "High Fraud Risk Detected");
        assert_eq!(view.confidence.text, "81.2%");
        assert_eq!(view.fraud.text, "81.2%");
        assert_eq!(view.safe.text, "18.8%");
        assert!(view.celebration.is_none());
    }

    #[test]
    fn safe_result_uses_success_styling() {
        let view = ResultView::from_response(&response(false, 75.0, 25.0));
        assert_eq!(view.icon, "✅");
        assert_eq!(view.tone.color_var(), "var(--success)");
        assert_eq!(view.title, "Transaction Appears Safe");
        assert_eq!(view.safe.width, 75.0);
        assert_eq!(view.fraud.width, 25.0);
        assert!(view.celebration.is_none());
    }

    #[test]
    fn confident_safe_result_celebrates() {
        let mut rng = StdRng::seed_from_u64(7);
        let view = ResultView::with_rng(&response(false, 97.5, 2.5), &mut rng);
        let burst = view.celebration.expect("burst expected above 90% confidence");
        assert_eq!(burst.particles.len(), PARTICLE_COUNT);
        for (i, p) in burst.particles.iter().enumerate() {
            assert_eq!(p.delay_ms, i as u64 * 50);
            assert!(PARTICLE_COLORS.contains(&p.color));
            assert!((0.0..TAU).contains(&p.angle));
            assert!((100.0..200.0).contains(&p.velocity));
            assert!((1000..1500).contains(&p.duration_ms));
        }
    }

    #[test]
    fn exactly_ninety_does_not_celebrate() {
        let view = ResultView::from_response(&response(false, 90.0, 10.0));
        assert!(view.celebration.is_none());
    }

    #[test]
    fn confident_fraud_never_celebrates() {
        let view = ResultView::from_response(&response(true, 99.0, 99.0));
        assert!(view.celebration.is_none());
    }

    #[test]
    fn bar_widths_are_clamped() {
        assert_eq!(Meter::from_percent(140.0).width, 100.0);
        assert_eq!(Meter::from_percent(-3.0).width, 0.0);
        assert_eq!(Meter::from_percent(f64::NAN).width, 0.0);
        assert_eq!(Meter::from_percent(140.0).text, "140.0%");
    }

    #[test]
    fn halfway_values_round_up() {
        assert_eq!(Meter::from_percent(87.25).text, "87.3%");
        assert_eq!(Meter::from_percent(12.75).text, "12.8%");
        assert_eq!(Meter::from_percent(0.25).text, "0.3%");
        assert_eq!(Meter::from_percent(50.25).text, "50.3%");
        assert_eq!(Meter::from_percent(50.75).text, "50.8%");
        assert_eq!(Meter::from_percent(-0.25).text, "-0.3%");
        assert_eq!(Meter::from_percent(81.234).text, "81.2%");
        assert_eq!(Meter::from_percent(1.15).text, "1.1%");
        assert_eq!(Meter::from_percent(87.5).text, "87.5%");
    }

    #[test]
    fn error_view_carries_message() {
        let view = ErrorView::from(&ValidationError::InvalidDistance);
        assert_eq!(view.icon, "❌");
        assert_eq!(view.title, "Error");
        assert_eq!(view.message, "Please enter a valid distance (0 or greater)");
    }
}
