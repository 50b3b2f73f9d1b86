/// Scene store: the ten fixed scenes of the story.
///
/// All scene data is `'static` and never mutated, so a `SceneStore` can be
/// shared freely between readers.

use crate::domain::error::EngineError;

pub type SceneId = usize;

pub const SCENE_COUNT: usize = 10;
pub const OPENING_SCENE: SceneId = 0;
/// The story's absorbing end state: choices here loop with feedback only.
pub const TERMINAL_SCENE: SceneId = 9;

pub const CHOICES_PER_SCENE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scene {
    pub id: SceneId,
    pub narrative_text: &'static str,
    pub choice_labels: [&'static str; CHOICES_PER_SCENE],
    /// Dramatic scenes are revealed at the slow pace with a held pause.
    pub dramatic: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct SceneStore {
    scenes: &'static [Scene],
}

impl SceneStore {
    pub fn new() -> Self {
        SceneStore { scenes: &SCENES }
    }

    pub fn get_scene(&self, id: SceneId) -> Result<&'static Scene, EngineError> {
        self.scenes.get(id).ok_or(EngineError::OutOfRange(id))
    }

    pub fn contains(&self, id: SceneId) -> bool {
        id < self.scenes.len()
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

static SCENES: [Scene; SCENE_COUNT] = [
    Scene {
        id: 0,
        narrative_text: "The sun rises over a dry savanna. Your tribe huddles \
            in the rocks, hungry and afraid. In the grey light something \
            stands near the cave that was not there last night: a tall \
            black shape, too straight to be a stone.",
        choice_labels: [
            "Approach the black shape",
            "Dig among the old bones",
            "Follow the tribe to the water",
            "Sleep until the light is full",
        ],
        dramatic: true,
    },
    Scene {
        id: 1,
        narrative_text: "The slab towers over you, smooth and silent. It \
            swallows the sunlight. Its edges are sharper than any tooth. \
            A faint hum seems to come from everywhere at once.",
        choice_labels: [
            "Touch the monolith",
            "Circle it slowly",
            "Search the ground nearby",
            "Flee back to the tribe",
        ],
        dramatic: false,
    },
    Scene {
        id: 2,
        narrative_text: "A field of bleached bones lies in the dust where a \
            great beast once fell. Skulls, ribs, a heavy thigh bone still \
            whole. Flies drift lazily above it all.",
        choice_labels: [
            "Take the heavy thigh bone",
            "Sift through the skulls",
            "Return to the monolith",
            "Go to the water hole",
        ],
        dramatic: false,
    },
    Scene {
        id: 3,
        narrative_text: "The bone is heavy in your hand. You turn it over. \
            It fits your grip as if it had been waiting for you. The \
            skeleton at your feet looks fragile now.",
        choice_labels: [
            "Smash the skeleton",
            "Carry it to the water hole",
            "Return to the monolith",
            "Hurl the bone into the sky",
        ],
        dramatic: false,
    },
    Scene {
        id: 4,
        narrative_text: "Muddy water, half dried out. Across the pool a rival \
            tribe shrieks and beats the ground. They are many, and they \
            want the water for themselves.",
        choice_labels: [
            "Stand your ground",
            "Drink quickly and retreat",
            "Watch the other tribe",
            "Seek the monolith",
        ],
        dramatic: false,
    },
    Scene {
        id: 5,
        narrative_text: "Your fingers meet the black surface. Cold. Then the \
            world tilts. Visions flood in: tools, fire, towers of light, \
            wheels turning in the dark between the stars.",
        choice_labels: [
            "Embrace the visions",
            "Pull your hand away",
            "Look for something to hold",
            "Cry out to the tribe",
        ],
        dramatic: true,
    },
    Scene {
        id: 6,
        narrative_text: "The rival tribe charges. Dust, teeth, screaming. One \
            of them lunges for the water. Everything you have seen and \
            everything you have learned comes down to this moment.",
        choice_labels: [
            "Swing whatever your hand finds",
            "Fall back to the rocks",
            "Howl for the tribe to fight",
            "Run to the monolith",
        ],
        dramatic: true,
    },
    Scene {
        id: 7,
        narrative_text: "A bone spins upward, turning end over end, higher \
            and higher, until it is no longer a bone at all but a white \
            ship turning slowly among the stars. Ages pass in a heartbeat.",
        choice_labels: [
            "Follow the spinning ship",
            "Drift with the stars",
            "Reach for the light",
            "Return to the monolith",
        ],
        dramatic: true,
    },
    Scene {
        id: 8,
        narrative_text: "A long ship glides toward Jupiter. The crew sleeps \
            in frosted pods. A red eye glows on the console, watching. \
            Ahead, in orbit, something black and perfectly straight \
            waits.",
        choice_labels: [
            "Wake the sleeping crew",
            "Step into the pod bay",
            "Speak to the ship",
            "Look back toward Earth",
        ],
        dramatic: false,
    },
    Scene {
        id: 9,
        narrative_text: "The ship's mind speaks in a calm, gentle voice. It \
            knows your name. It knows why you came. Beyond the window \
            Jupiter fills the sky, and the monolith turns against it.",
        choice_labels: [
            "Ask about the monolith",
            "Ask it to open the doors",
            "Talk to the AI",
            "Look at Jupiter",
        ],
        dramatic: true,
    },
];
