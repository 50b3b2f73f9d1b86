/// Presentation layer: typewriter narrative on the primary surface, the
/// choice menu on the secondary surface.
///
/// How a render goes:
///   1. Clear the primary surface and redraw the 3-line header
///   2. Reveal the feedback line (then hold) or the scene text, one
///      character per flush
///   3. Redraw the secondary surface: four button-tagged choices, the
///      milestone count, the exit footer
///
/// The renderer holds both surfaces for the whole call. All waits go
/// through the `Pacer`, so a reveal always runs to completion.

use std::time::Duration;

use crate::config::TimingConfig;
use crate::domain::error::EngineError;
use crate::domain::flags::StoryFlag;
use crate::domain::scene::Scene;
use crate::sim::state::GameState;
use crate::timing::Pacer;
use crate::ui::mapper::CHOICE_BUTTONS;
use crate::ui::surface::{Style, Surface};

const HEADER: [(&str, Style); 3] = [
    ("M O N O L I T H", Style::Heading),
    ("a story of dawn and stars", Style::Dim),
    ("", Style::Dim),
];

const EXIT_FOOTER: &str = "Press START to exit";

/// Timing for one reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealPace {
    pub per_char: Duration,
    /// Held silence before the first character.
    pub hold: Duration,
}

pub struct Presenter<P: Pacer> {
    pacer: P,
    timing: TimingConfig,
}

impl<P: Pacer> Presenter<P> {
    pub fn new(pacer: P, timing: TimingConfig) -> Self {
        Presenter { pacer, timing }
    }

    pub fn normal_pace(&self) -> RevealPace {
        RevealPace { per_char: self.timing.reveal_char, hold: Duration::ZERO }
    }

    pub fn dramatic_pace(&self) -> RevealPace {
        RevealPace { per_char: self.timing.dramatic_char, hold: self.timing.dramatic_hold }
    }

    pub fn render(
        &mut self,
        primary: &mut dyn Surface,
        secondary: &mut dyn Surface,
        scene: &Scene,
        state: &GameState,
        feedback: Option<&str>,
    ) -> Result<(), EngineError> {
        primary.clear()?;
        draw_header(primary)?;

        match feedback.filter(|f| !f.is_empty()) {
            Some(text) => {
                let text = wrap(text, primary.width());
                self.reveal(primary, &text, Style::Default, self.normal_pace())?;
                self.pacer.pause(self.timing.feedback_pause);
            }
            None => {
                let pace = if scene.dramatic { self.dramatic_pace() } else { self.normal_pace() };
                let text = wrap(scene.narrative_text, primary.width());
                self.reveal(primary, &text, Style::Default, pace)?;
            }
        }

        draw_menu(secondary, scene, state)
    }

    /// Typewriter effect: write, flush, wait, once per character.
    pub fn reveal(
        &mut self,
        surface: &mut dyn Surface,
        text: &str,
        style: Style,
        pace: RevealPace,
    ) -> Result<(), EngineError> {
        if !pace.hold.is_zero() {
            self.pacer.pause(pace.hold);
        }
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            surface.write(ch.encode_utf8(&mut buf), style)?;
            surface.flush()?;
            self.pacer.pause(pace.per_char);
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn pacer(&self) -> &P {
        &self.pacer
    }
}

fn draw_header(surface: &mut dyn Surface) -> Result<(), EngineError> {
    for (line, style) in HEADER {
        surface.write(line, style)?;
        surface.write("\n", style)?;
    }
    surface.flush()
}

fn draw_menu(surface: &mut dyn Surface, scene: &Scene, state: &GameState) -> Result<(), EngineError> {
    surface.clear()?;
    for (i, label) in scene.choice_labels.iter().enumerate() {
        let style = Style::Choice(i as u8 + 1);
        surface.write(&format!("[{}] ", CHOICE_BUTTONS[i]), style)?;
        surface.write(label, style)?;
        surface.write("\n", Style::Default)?;
    }
    surface.write("\n", Style::Default)?;
    surface.write(
        &format!("{}/{} milestones", state.flags.count(), StoryFlag::ALL.len()),
        Style::Dim,
    )?;
    surface.write("\n", Style::Default)?;
    surface.write(EXIT_FOOTER, Style::Dim)?;
    surface.flush()
}

/// Greedy word wrap to `width` columns. Words longer than a line are left
/// for the surface to break.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut out = String::with_capacity(text.len() + text.len() / width.max(8));
    let mut line_len = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if line_len > 0 && line_len + 1 + len > width {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(word);
        line_len += len;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::scene::SceneStore;
    use crate::testing::{MemorySurface, RecordingPacer, SurfaceOp};

    fn presenter() -> Presenter<RecordingPacer> {
        Presenter::new(RecordingPacer::default(), GameConfig::default().timing)
    }

    #[test]
    fn reveal_flushes_once_per_character_in_order() {
        let mut p = presenter();
        let mut surface = MemorySurface::new(80);
        let pace = RevealPace { per_char: Duration::from_millis(30), hold: Duration::ZERO };
        p.reveal(&mut surface, "héllo", Style::Default, pace).expect("reveal");

        let expected: Vec<SurfaceOp> = "héllo"
            .chars()
            .flat_map(|c| [SurfaceOp::Write(c.to_string(), Style::Default), SurfaceOp::Flush])
            .collect();
        assert_eq!(surface.ops, expected);
        assert_eq!(p.pacer().waits, vec![Duration::from_millis(30); 5]);
    }

    #[test]
    fn dramatic_reveal_holds_first() {
        let mut p = presenter();
        let mut surface = MemorySurface::new(80);
        let pace = p.dramatic_pace();
        p.reveal(&mut surface, "ab", Style::Default, pace).expect("reveal");
        assert_eq!(
            p.pacer().waits,
            vec![Duration::from_millis(1000), Duration::from_millis(45), Duration::from_millis(45)]
        );
        assert!(pace.per_char > p.normal_pace().per_char);
    }

    #[test]
    fn render_shows_scene_text_and_menu() {
        let store = SceneStore::new();
        let scene = store.get_scene(1).expect("scene");
        let mut p = presenter();
        let mut primary = MemorySurface::new(1000);
        let mut secondary = MemorySurface::new(60);

        p.render(&mut primary, &mut secondary, scene, &GameState::new(), None).expect("render");

        let text = primary.text();
        assert!(text.starts_with("M O N O L I T H\n"));
        assert!(text.ends_with(&wrap(scene.narrative_text, 1000)));

        let menu = secondary.text();
        for (i, label) in scene.choice_labels.iter().enumerate() {
            assert!(menu.contains(&format!("[{}] {}", CHOICE_BUTTONS[i], label)));
            assert_eq!(secondary.styles_of(label), vec![Style::Choice(i as u8 + 1)]);
        }
        assert!(menu.contains("0/6 milestones"));
        assert!(menu.ends_with(EXIT_FOOTER));
    }

    #[test]
    fn empty_feedback_falls_back_to_narrative() {
        let store = SceneStore::new();
        let scene = store.get_scene(2).expect("scene");
        let mut p = presenter();
        let mut primary = MemorySurface::new(1000);
        let mut secondary = MemorySurface::new(60);

        p.render(&mut primary, &mut secondary, scene, &GameState::new(), Some("")).expect("render");

        assert!(primary.text().ends_with(scene.narrative_text));
        // No feedback hold for a fallback render.
        assert!(!p.pacer().waits.contains(&Duration::from_millis(1200)));
    }

    #[test]
    fn feedback_replaces_narrative_and_holds() {
        let store = SceneStore::new();
        let scene = store.get_scene(0).expect("scene");
        let mut p = presenter();
        let mut primary = MemorySurface::new(1000);
        let mut secondary = MemorySurface::new(60);

        p.render(&mut primary, &mut secondary, scene, &GameState::new(), Some("The night passes."))
            .expect("render");

        let text = primary.text();
        assert!(text.ends_with("The night passes."));
        assert!(!text.contains(scene.narrative_text));
        assert_eq!(p.pacer().waits.last(), Some(&Duration::from_millis(1200)));
        // Feedback uses the normal pace even on a dramatic scene.
        assert_eq!(p.pacer().waits[0], Duration::from_millis(30));
    }

    #[test]
    fn milestones_follow_state() {
        let store = SceneStore::new();
        let scene = store.get_scene(3).expect("scene");
        let mut state = GameState::new();
        state.flags.set(StoryFlag::HasBone);
        state.flags.set(StoryFlag::MetMonolith);
        let mut p = presenter();
        let mut primary = MemorySurface::new(1000);
        let mut secondary = MemorySurface::new(60);

        p.render(&mut primary, &mut secondary, scene, &state, None).expect("render");
        assert!(secondary.text().contains("2/6 milestones"));
    }

    #[test]
    fn surface_failure_propagates() {
        let store = SceneStore::new();
        let scene = store.get_scene(0).expect("scene");
        let mut p = presenter();
        let mut primary = MemorySurface::broken();
        let mut secondary = MemorySurface::new(60);

        let err = p
            .render(&mut primary, &mut secondary, scene, &GameState::new(), None)
            .unwrap_err();
        assert!(matches!(err, EngineError::SurfaceWriteFailure(_)));
        assert!(secondary.ops.is_empty());
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(wrap("the quick brown fox", 9), "the quick\nbrown fox");
        assert_eq!(wrap("  spaced   out  ", 80), "spaced out");
        assert_eq!(wrap("unbreakable", 4), "unbreakable");
        assert_eq!(wrap("", 10), "");
    }
}
