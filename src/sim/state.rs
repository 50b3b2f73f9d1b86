/// GameState: everything that changes during one playthrough.
///
/// Created at program start and dropped at exit; never persisted.

use crate::domain::flags::StoryFlags;
use crate::domain::scene::{SceneId, OPENING_SCENE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    pub current_scene: SceneId,
    pub flags: StoryFlags,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            current_scene: OPENING_SCENE,
            flags: StoryFlags::default(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
