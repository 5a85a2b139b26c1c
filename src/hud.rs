//! Score and win display sinks
//!
//! The frame driver pushes score changes and the win signal here; the
//! display itself (DOM text, console) is the sink's business.

/// Text shown in the score display
pub fn score_label(score: u32, threshold: u32) -> String {
    format!("Score: {score} / {threshold}")
}

/// Anything that can show the score and the win banner
pub trait HudSink {
    fn set_score(&mut self, score: u32, threshold: u32);
    fn set_win(&mut self);
}

/// Writes HUD updates to the log (native runs)
#[derive(Debug, Default)]
pub struct LogHud;

impl HudSink for LogHud {
    fn set_score(&mut self, score: u32, threshold: u32) {
        log::debug!("{}", score_label(score, threshold));
    }

    fn set_win(&mut self) {
        log::info!("You win!");
    }
}

/// Updates the `#score` text and reveals the `#win` banner
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct DomHud;

#[cfg(target_arch = "wasm32")]
impl HudSink for DomHud {
    fn set_score(&mut self, score: u32, threshold: u32) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some(&score_label(score, threshold)));
        }
    }

    fn set_win(&mut self) {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document
            .get_element_by_id("win")
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", "block");
        }
    }
}
