//! Platform abstraction layer
//!
//! Browser bindings around the simulation:
//! - Keyboard subscription (removed again on drop)
//! - Focus gating for key presses
//! - Tuning embedded in the host page
//! - Frame loop pause/resume across page hide and show

pub mod frame_clock;
#[cfg(target_arch = "wasm32")]
pub mod keyboard;
#[cfg(target_arch = "wasm32")]
pub mod page;

pub use frame_clock::FrameClock;
#[cfg(target_arch = "wasm32")]
pub use keyboard::KeyboardBinding;
#[cfg(target_arch = "wasm32")]
pub use page::load_tuning;

use crate::tuning::Tuning;

/// Resolve the page's tuning text (if any) to a usable tuning.
///
/// Missing text means defaults; bad text is logged and also means defaults.
pub fn tuning_or_default(text: Option<&str>) -> Tuning {
    match text.map(Tuning::from_json) {
        None => Tuning::default(),
        Some(Ok(tuning)) => {
            log::info!(
                "Loaded page tuning ({} obstacles, {} platforms)",
                tuning.obstacles.len(),
                tuning.platforms.len()
            );
            tuning
        }
        Some(Err(err)) => {
            log::warn!("Ignoring page tuning: {}", err);
            Tuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::OverlapPolicy;

    #[test]
    fn test_no_text_uses_defaults() {
        assert_eq!(tuning_or_default(None), Tuning::default());
    }

    #[test]
    fn test_bad_text_falls_back() {
        assert_eq!(tuning_or_default(Some("not json")), Tuning::default());
    }

    #[test]
    fn test_good_text_is_used() {
        let tuning = tuning_or_default(Some(r#"{ "overlap": "first_match" }"#));
        assert_eq!(tuning.overlap, OverlapPolicy::FirstMatch);
    }
}
