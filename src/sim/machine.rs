/// Narrative state machine: resolve one choice against the transition table.
///
/// Order of effects for a resolved choice:
///   1. Set the transition's flags (idempotent)
///   2. Move to the target scene, unless the current scene is terminal
///   3. Play the cue, if any, to completion
///   4. Hand a `RenderDirective` back for the presentation layer

use tracing::debug;

use crate::domain::cue::CuePlayer;
use crate::domain::error::EngineError;
use crate::domain::scene::{SceneId, TERMINAL_SCENE};
use crate::domain::transition::TransitionTable;
use crate::sim::state::GameState;

/// What the renderer should show after a choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderDirective {
    pub scene: SceneId,
    pub feedback: Option<&'static str>,
}

pub fn apply_choice(
    table: &TransitionTable,
    state: &mut GameState,
    choice: u8,
    cues: &mut dyn CuePlayer,
) -> Result<RenderDirective, EngineError> {
    let transition = table.lookup(state.current_scene, choice)?;

    for &flag in transition.flags {
        if state.flags.set(flag) {
            debug!(?flag, "milestone reached");
        }
    }

    if state.current_scene != TERMINAL_SCENE {
        state.current_scene = transition.to;
    }

    debug!(
        from = transition.from,
        choice,
        to = state.current_scene,
        "choice resolved"
    );

    if let Some(cue) = transition.cue {
        cues.play_cue(cue);
    }

    Ok(RenderDirective {
        scene: state.current_scene,
        feedback: transition.feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cue::CueId;
    use crate::domain::scene::SCENE_COUNT;
    use crate::testing::RecordingCues;

    fn play(state: &mut GameState, choice: u8, cues: &mut RecordingCues) -> RenderDirective {
        apply_choice(&TransitionTable::story(), state, choice, cues).expect("mapped choice")
    }

    #[test]
    fn every_non_terminal_pair_lands_on_a_valid_scene() {
        let table = TransitionTable::story();
        for scene in 0..TERMINAL_SCENE {
            for choice in 1..=4u8 {
                let mut state = GameState { current_scene: scene, ..GameState::new() };
                let mut cues = RecordingCues::default();
                let d = apply_choice(&table, &mut state, choice, &mut cues).expect("mapped");
                assert!(d.scene < SCENE_COUNT);
                assert_eq!(d.scene, state.current_scene);
            }
        }
    }

    #[test]
    fn documented_path_is_exact() {
        let mut state = GameState::new();
        let mut cues = RecordingCues::default();

        let d = play(&mut state, 1, &mut cues);
        assert_eq!(d.scene, 1);
        assert!(cues.played.is_empty());

        let d = play(&mut state, 1, &mut cues);
        assert_eq!(d.scene, 5);
        assert!(state.flags.touched_monolith);
        assert_eq!(cues.played, vec![CueId::Discovery]);

        let before = state.flags;
        let d = play(&mut state, 1, &mut cues);
        assert_eq!(d.scene, 7);
        assert_eq!(state.flags, before);
        assert_eq!(cues.played.len(), 1);

        let d = play(&mut state, 4, &mut cues);
        assert_eq!(d.scene, 1);
        assert_eq!(state.flags, before);
    }

    #[test]
    fn terminal_scene_is_absorbing() {
        for choice in 1..=4u8 {
            let mut state = GameState { current_scene: TERMINAL_SCENE, ..GameState::new() };
            let mut cues = RecordingCues::default();
            let d = play(&mut state, choice, &mut cues);
            assert_eq!(d.scene, TERMINAL_SCENE);
            assert_eq!(state.current_scene, TERMINAL_SCENE);
            assert!(d.feedback.is_some());
        }
    }

    #[test]
    fn talking_to_the_ai_unlocks_dialogue() {
        let mut state = GameState { current_scene: TERMINAL_SCENE, ..GameState::new() };
        let mut cues = RecordingCues::default();
        play(&mut state, 3, &mut cues);
        assert!(state.flags.ai_dialogue);
        assert_eq!(cues.played, vec![CueId::AiDialogue]);

        // Repeating it keeps the flag and plays the cue again.
        play(&mut state, 3, &mut cues);
        assert!(state.flags.ai_dialogue);
        assert_eq!(cues.played.len(), 2);
    }

    #[test]
    fn looking_at_jupiter_changes_nothing() {
        let mut state = GameState { current_scene: TERMINAL_SCENE, ..GameState::new() };
        let mut cues = RecordingCues::default();
        let before = state;
        play(&mut state, 4, &mut cues);
        assert_eq!(state, before);
        assert!(cues.played.is_empty());
    }

    #[test]
    fn flags_are_monotonic_over_long_walks() {
        // Deterministic pseudo-random walk over the whole graph.
        let mut seed: u32 = 0x2001;
        for _ in 0..50 {
            let mut state = GameState::new();
            let mut cues = RecordingCues::default();
            for _ in 0..40 {
                seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
                let choice = ((seed >> 16) % 4) as u8 + 1;
                let before = state.flags;
                play(&mut state, choice, &mut cues);
                assert!(state.flags.includes(&before));
                assert!(state.current_scene < SCENE_COUNT);
            }
        }
    }

    #[test]
    fn invalid_choice_leaves_state_untouched() {
        let mut state = GameState::new();
        let mut cues = RecordingCues::default();
        let err = apply_choice(&TransitionTable::story(), &mut state, 7, &mut cues).unwrap_err();
        assert!(matches!(err, EngineError::UnmappedChoice { scene: 0, choice: 7 }));
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn arriving_at_the_monolith_means_meeting_it() {
        let table = TransitionTable::story();
        let arrivals = table.entries().iter().filter(|t| t.to == 1 && t.from != 1);
        for t in arrivals {
            let mut state = GameState { current_scene: t.from, ..GameState::new() };
            // Scene 5 is only reachable through the monolith.
            if t.from == 5 {
                state.flags.met_monolith = true;
            }
            let mut cues = RecordingCues::default();
            play(&mut state, t.choice, &mut cues);
            assert_eq!(state.current_scene, 1);
            assert!(state.flags.met_monolith, "{} -> 1 via choice {}", t.from, t.choice);
        }
    }

    #[test]
    fn bone_field_detour_still_meets_the_monolith() {
        let mut state = GameState::new();
        let mut cues = RecordingCues::default();
        // dawn → bones → take bone → hurl it → return to the monolith
        for choice in [2, 1, 4, 4] {
            play(&mut state, choice, &mut cues);
        }
        assert_eq!(state.current_scene, 1);
        assert!(state.flags.met_monolith);
    }

    #[test]
    fn feedback_choices_stay_in_place() {
        let mut state = GameState::new();
        let mut cues = RecordingCues::default();
        let d = play(&mut state, 4, &mut cues);
        assert_eq!(d.scene, 0);
        assert!(d.feedback.is_some());
    }
}
