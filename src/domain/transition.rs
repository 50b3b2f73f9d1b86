/// The story graph as a flat transition table.
///
/// Every (scene, choice) pair has exactly one entry. The table is checked by
/// `TransitionTable::validate` at startup so the engine never has to guess at
/// runtime.

use std::collections::VecDeque;

use crate::domain::cue::CueId;
use crate::domain::error::EngineError;
use crate::domain::flags::StoryFlag;
use crate::domain::scene::{
    SceneId, SceneStore, CHOICES_PER_SCENE, OPENING_SCENE, SCENE_COUNT, TERMINAL_SCENE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: SceneId,
    /// 1-based, matching the button a player presses.
    pub choice: u8,
    pub to: SceneId,
    pub flags: &'static [StoryFlag],
    pub cue: Option<CueId>,
    pub feedback: Option<&'static str>,
}

pub struct TransitionTable {
    entries: &'static [Transition],
}

impl TransitionTable {
    /// The built-in story.
    pub fn story() -> Self {
        TransitionTable { entries: STORY }
    }

    #[cfg(test)]
    pub fn from_entries(entries: &'static [Transition]) -> Self {
        TransitionTable { entries }
    }

    pub fn lookup(&self, scene: SceneId, choice: u8) -> Result<&'static Transition, EngineError> {
        self.entries
            .iter()
            .find(|t| t.from == scene && t.choice == choice)
            .ok_or(EngineError::UnmappedChoice { scene, choice })
    }

    #[cfg(test)]
    pub fn entries(&self) -> &'static [Transition] {
        self.entries
    }

    /// Check completeness, uniqueness, targets, reachability and that the
    /// terminal scene only loops on itself.
    pub fn validate(&self, store: &SceneStore) -> Result<(), EngineError> {
        let mut seen = [[false; CHOICES_PER_SCENE]; SCENE_COUNT];

        for t in self.entries {
            if !store.contains(t.from) {
                return Err(EngineError::OutOfRange(t.from));
            }
            if !store.contains(t.to) {
                return Err(EngineError::OutOfRange(t.to));
            }
            let slot = choice_slot(t.choice).ok_or(EngineError::UnmappedChoice {
                scene: t.from,
                choice: t.choice,
            })?;
            if seen[t.from][slot] {
                return Err(EngineError::DuplicateTransition { scene: t.from, choice: t.choice });
            }
            seen[t.from][slot] = true;
            if t.from == TERMINAL_SCENE && t.to != TERMINAL_SCENE {
                return Err(EngineError::TerminalEscape { scene: t.from, to: t.to });
            }
        }

        for (scene, row) in seen.iter().enumerate() {
            if let Some(slot) = row.iter().position(|&present| !present) {
                return Err(EngineError::UnmappedChoice { scene, choice: slot as u8 + 1 });
            }
        }

        let reachable = self.reachable_from(OPENING_SCENE);
        if let Some(scene) = reachable.iter().position(|&r| !r) {
            return Err(EngineError::UnreachableScene(scene));
        }

        Ok(())
    }

    /// Breadth-first walk over the table.
    fn reachable_from(&self, start: SceneId) -> [bool; SCENE_COUNT] {
        let mut reached = [false; SCENE_COUNT];
        let mut queue = VecDeque::from([start]);
        reached[start] = true;
        while let Some(scene) = queue.pop_front() {
            for t in self.entries.iter().filter(|t| t.from == scene) {
                if t.to < SCENE_COUNT && !reached[t.to] {
                    reached[t.to] = true;
                    queue.push_back(t.to);
                }
            }
        }
        reached
    }
}

/// Map a 1-based choice to a row index.
pub fn choice_slot(choice: u8) -> Option<usize> {
    match choice {
        1..=4 => Some(choice as usize - 1),
        _ => None,
    }
}

// ── Story table ──

use StoryFlag::*;

const fn go(from: SceneId, choice: u8, to: SceneId) -> Transition {
    Transition { from, choice, to, flags: &[], cue: None, feedback: None }
}

const fn stay(scene: SceneId, choice: u8, feedback: &'static str) -> Transition {
    Transition { from: scene, choice, to: scene, flags: &[], cue: None, feedback: Some(feedback) }
}

static STORY: &[Transition] = &[
    // 0: dawn
    Transition { flags: &[MetMonolith], ..go(0, 1, 1) },
    go(0, 2, 2),
    go(0, 3, 4),
    stay(0, 4, "The night passes. At dawn the black shape is still there."),
    // 1: the monolith
    Transition { flags: &[TouchedMonolith], cue: Some(CueId::Discovery), ..go(1, 1, 5) },
    stay(1, 2, "Every edge is perfectly straight. Nothing in your world is straight."),
    go(1, 3, 2),
    go(1, 4, 4),
    // 2: bone field
    Transition { flags: &[HasBone], cue: Some(CueId::ToolAcquired), ..go(2, 1, 3) },
    stay(2, 2, "Empty eye sockets stare back. The dead have nothing to say."),
    Transition { flags: &[MetMonolith], ..go(2, 3, 1) },
    go(2, 4, 4),
    // 3: the bone
    Transition {
        flags: &[LearnedToolUse],
        feedback: Some("Bones shatter under the blow. Your arm understands before you do."),
        ..go(3, 1, 3)
    },
    Transition { flags: &[WitnessedConflict], cue: Some(CueId::Conflict), ..go(3, 2, 6) },
    Transition { flags: &[MetMonolith], ..go(3, 3, 1) },
    Transition { flags: &[LearnedToolUse], cue: Some(CueId::Transformation), ..go(3, 4, 7) },
    // 4: water hole
    Transition { flags: &[WitnessedConflict], cue: Some(CueId::Conflict), ..go(4, 1, 6) },
    go(4, 2, 0),
    stay(4, 3, "They are loud and they are many. They will not share."),
    Transition { flags: &[MetMonolith], ..go(4, 4, 1) },
    // 5: visions
    go(5, 1, 7),
    go(5, 2, 1),
    go(5, 3, 2),
    go(5, 4, 4),
    // 6: conflict
    Transition { flags: &[LearnedToolUse], cue: Some(CueId::Transformation), ..go(6, 1, 7) },
    go(6, 2, 0),
    stay(6, 3, "Your howl is lost in the din. No one comes."),
    Transition { flags: &[MetMonolith], ..go(6, 4, 1) },
    // 7: among the stars
    go(7, 1, 8),
    go(7, 2, 8),
    stay(7, 3, "The light recedes as you reach for it, always just ahead."),
    Transition { flags: &[MetMonolith], ..go(7, 4, 1) },
    // 8: the ship
    stay(8, 1, "The pods hum softly. The crew sleeps on, unaware."),
    go(8, 2, 9),
    Transition { flags: &[AiDialogue], cue: Some(CueId::AiDialogue), ..go(8, 3, 9) },
    go(8, 4, 7),
    // 9: the ship's mind (terminal)
    stay(9, 1, "\"It was placed here. It has been waiting. So have I.\""),
    stay(9, 2, "The voice stays calm. The doors stay closed."),
    Transition {
        flags: &[AiDialogue],
        cue: Some(CueId::AiDialogue),
        feedback: Some("\"I have been looking forward to talking with you.\""),
        ..go(9, 3, 9)
    },
    stay(9, 4, "Jupiter turns, vast and banded. The monolith hangs before it, patient."),
];
