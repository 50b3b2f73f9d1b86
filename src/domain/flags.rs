/// Story milestones.
///
/// Flags only ever go from `false` to `true` within a playthrough. There is
/// no way to clear one.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StoryFlag {
    MetMonolith,
    HasBone,
    TouchedMonolith,
    LearnedToolUse,
    WitnessedConflict,
    AiDialogue,
}

impl StoryFlag {
    pub const ALL: [StoryFlag; 6] = [
        StoryFlag::MetMonolith,
        StoryFlag::HasBone,
        StoryFlag::TouchedMonolith,
        StoryFlag::LearnedToolUse,
        StoryFlag::WitnessedConflict,
        StoryFlag::AiDialogue,
    ];
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StoryFlags {
    pub met_monolith: bool,
    pub has_bone: bool,
    pub touched_monolith: bool,
    pub learned_tool_use: bool,
    pub witnessed_conflict: bool,
    pub ai_dialogue: bool,
}

impl StoryFlags {
    pub fn get(&self, flag: StoryFlag) -> bool {
        match flag {
            StoryFlag::MetMonolith => self.met_monolith,
            StoryFlag::HasBone => self.has_bone,
            StoryFlag::TouchedMonolith => self.touched_monolith,
            StoryFlag::LearnedToolUse => self.learned_tool_use,
            StoryFlag::WitnessedConflict => self.witnessed_conflict,
            StoryFlag::AiDialogue => self.ai_dialogue,
        }
    }

    /// Set a flag. Returns true if it was newly set.
    pub fn set(&mut self, flag: StoryFlag) -> bool {
        let slot = match flag {
            StoryFlag::MetMonolith => &mut self.met_monolith,
            StoryFlag::HasBone => &mut self.has_bone,
            StoryFlag::TouchedMonolith => &mut self.touched_monolith,
            StoryFlag::LearnedToolUse => &mut self.learned_tool_use,
            StoryFlag::WitnessedConflict => &mut self.witnessed_conflict,
            StoryFlag::AiDialogue => &mut self.ai_dialogue,
        };
        let fresh = !*slot;
        *slot = true;
        fresh
    }

    pub fn count(&self) -> usize {
        StoryFlag::ALL.iter().filter(|&&f| self.get(f)).count()
    }

    /// True if every flag set in `earlier` is also set in `self`.
    #[cfg(test)]
    pub fn includes(&self, earlier: &StoryFlags) -> bool {
        StoryFlag::ALL.iter().all(|&f| !earlier.get(f) || self.get(f))
    }
}
