//! Fire-and-forget tones and confetti. Nothing here reads or writes game state.

use crate::session::Feedback;
use rand::Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AudioContext, HtmlElement, OscillatorType, window};

const CONFETTI: [&str; 5] = ["🎉", "✨", "🍭", "🎈", "⭐"];

/// What to play for one feedback event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub tone_hz: f32,
    pub tone_secs: f64,
    pub confetti: usize,
}

pub fn effect_for(event: Feedback) -> Effect {
    match event {
        Feedback::Correct => Effect { tone_hz: 880.0, tone_secs: 0.08, confetti: 12 },
        Feedback::Incorrect => Effect { tone_hz: 220.0, tone_secs: 0.12, confetti: 0 },
        Feedback::PerfectPage => Effect { tone_hz: 880.0, tone_secs: 0.12, confetti: 24 },
    }
}

pub fn play(event: Feedback) {
    let effect = effect_for(event);
    // Audio may be unavailable (autoplay policy, old browsers); that is fine.
    if let Err(e) = play_tone(effect.tone_hz, effect.tone_secs) {
        log::debug!("tone skipped: {:?}", e);
    }
    if effect.confetti > 0 {
        if let Err(e) = burst_confetti(effect.confetti) {
            log::debug!("confetti skipped: {:?}", e);
        }
    }
}

fn play_tone(freq: f32, duration: f64) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let ctx = AudioContext::new()?;
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    osc.set_type(OscillatorType::Sine);
    osc.frequency().set_value(freq);
    gain.gain().set_value(0.02);
    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    osc.start()?;
    gain.gain()
        .exponential_ramp_to_value_at_time(0.0001, ctx.current_time() + duration)?;

    let stop = Closure::once_into_js(move || {
        let _ = osc.stop();
        let _ = ctx.close();
    });
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        stop.unchecked_ref(),
        (duration * 1000.0) as i32 + 50,
    )?;
    Ok(())
}

fn burst_confetti(count: usize) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let Some(container) = doc.get_element_by_id("confetti") else {
        return Ok(());
    };
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
        el.set_class_name("confetti");
        el.set_text_content(Some(CONFETTI[rng.gen_range(0..CONFETTI.len())]));
        let style = el.style();
        style.set_property("left", &format!("{:.1}%", rng.gen_range(0.0..90.0)))?;
        style.set_property("top", &format!("{:.1}%", 50.0 + rng.gen_range(0.0..30.0)))?;
        style.set_property(
            "transform",
            &format!("translateY(0) rotate({:.0}deg)", rng.gen_range(0.0..360.0)),
        )?;
        container.append_child(&el)?;

        let lifetime_ms = 1200 + rng.gen_range(0..600);
        let remove = Closure::once_into_js(move || el.remove());
        win.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            lifetime_ms,
        )?;
    }
    Ok(())
}
