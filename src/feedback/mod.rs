//! Short vibration and tone pulses acknowledging keyboard actions.
//!
//! Pulses are fire-and-forget: the vibration and the oscillator are scheduled
//! on the platform and nothing waits for them to finish.

use wasm_bindgen::JsValue;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackKind {
    Light,
    #[default]
    Medium,
    Heavy,
    Success,
    Error,
    Warning,
    Brutal,
}

/// Oscillator settings for one pulse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub volume: f32,
}

pub const PULSE_MS: u32 = 100;

impl FeedbackKind {
    /// Vibration pattern in milliseconds (on, off, on, ...).
    pub fn vibration_pattern(self) -> &'static [u32] {
        match self {
            Self::Light => &[50],
            Self::Medium => &[100],
            Self::Heavy => &[200],
            Self::Success => &[50, 50, 100],
            Self::Error => &[100, 50, 100, 50, 200],
            Self::Warning => &[150, 50, 150],
            Self::Brutal => &[300, 100, 300],
        }
    }

    pub fn tone(self) -> Tone {
        let (frequency_hz, volume) = match self {
            Self::Light => (800.0, 0.1),
            Self::Medium => (600.0, 0.2),
            Self::Heavy => (400.0, 0.3),
            Self::Success => (1000.0, 0.15),
            Self::Error => (200.0, 0.25),
            Self::Warning => (700.0, 0.2),
            Self::Brutal => (150.0, 0.4),
        };
        Tone {
            frequency_hz,
            volume,
        }
    }
}

pub trait FeedbackSink {
    /// Start a pulse and return immediately.
    fn pulse(&self, kind: FeedbackKind);
}

/// Sink for environments without feedback (and for users who turned it off).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFeedback;

impl FeedbackSink for NoFeedback {
    fn pulse(&self, _kind: FeedbackKind) {}
}

/// Browser feedback through the Vibration and Web Audio APIs.
///
/// Capabilities are probed once in [`HapticFeedback::detect`]; a missing one is
/// skipped on every pulse.
pub struct HapticFeedback {
    navigator: Option<web_sys::Navigator>,
    audio: Option<web_sys::AudioContext>,
    sound: bool,
}

impl HapticFeedback {
    pub fn detect(sound: bool) -> Self {
        let window = web_sys::window();

        let navigator = window.as_ref().map(|w| w.navigator()).filter(|n| {
            js_sys::Reflect::has(n, &JsValue::from_str("vibrate")).unwrap_or(false)
        });

        let audio = if sound {
            match web_sys::AudioContext::new() {
                Ok(ctx) => Some(ctx),
                Err(_) => {
                    log::warn!("audio feedback unavailable: no AudioContext");
                    None
                }
            }
        } else {
            None
        };

        log::debug!(
            "feedback capabilities: vibrate={} audio={}",
            navigator.is_some(),
            audio.is_some()
        );

        Self {
            navigator,
            audio,
            sound,
        }
    }

    pub fn can_vibrate(&self) -> bool {
        self.navigator.is_some()
    }

    pub fn can_play(&self) -> bool {
        self.sound && self.audio.is_some()
    }

    fn vibrate(&self, kind: FeedbackKind) {
        let Some(navigator) = &self.navigator else {
            return;
        };
        let pattern = js_sys::Array::new();
        for ms in kind.vibration_pattern() {
            pattern.push(&JsValue::from(*ms));
        }
        let _ = navigator.vibrate_with_pattern(&pattern);
    }

    fn play(&self, kind: FeedbackKind) -> Result<(), JsValue> {
        let Some(ctx) = &self.audio else {
            return Ok(());
        };
        let tone = kind.tone();
        let now = ctx.current_time();
        let end = now + f64::from(PULSE_MS) / 1000.0;

        let oscillator = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        oscillator
            .frequency()
            .set_value_at_time(tone.frequency_hz, now)?;
        gain.gain().set_value_at_time(tone.volume, now)?;
        gain.gain().exponential_ramp_to_value_at_time(0.001, end)?;

        let source: &web_sys::AudioScheduledSourceNode = &oscillator;
        source.start_with_when(now)?;
        source.stop_with_when(end)?;
        Ok(())
    }
}

impl FeedbackSink for HapticFeedback {
    fn pulse(&self, kind: FeedbackKind) {
        self.vibrate(kind);
        if self.sound {
            if let Err(e) = self.play(kind) {
                log::warn!("audio feedback failed: {e:?}");
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_patterns_alternate_on_off() {
        assert_eq!(FeedbackKind::Light.vibration_pattern(), &[50]);
        assert_eq!(FeedbackKind::Success.vibration_pattern(), &[50, 50, 100]);
        for kind in FeedbackKind::iter() {
            // Patterns start and end with a vibration segment.
            assert_eq!(kind.vibration_pattern().len() % 2, 1, "{kind}");
        }
    }

    #[test]
    fn test_heavier_pulses_sound_lower() {
        let light = FeedbackKind::Light.tone();
        let heavy = FeedbackKind::Heavy.tone();
        assert!(light.frequency_hz > heavy.frequency_hz);
        assert!(light.volume < heavy.volume);
        assert_eq!(FeedbackKind::Brutal.tone().frequency_hz, 150.0);
    }

    #[test]
    fn test_default_kind_is_medium() {
        assert_eq!(FeedbackKind::default(), FeedbackKind::Medium);
        assert_eq!(FeedbackKind::Warning.to_string(), "warning");
    }
}
