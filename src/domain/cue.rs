/// Named sound cues tied to narrative beats.
/// The waveforms live in `audio::cue`; the story table only names them.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CueId {
    Discovery,
    ToolAcquired,
    Conflict,
    Transformation,
    AiDialogue,
}

impl CueId {
    #[cfg(test)]
    pub const ALL: [CueId; 5] = [
        CueId::Discovery,
        CueId::ToolAcquired,
        CueId::Conflict,
        CueId::Transformation,
        CueId::AiDialogue,
    ];
}

/// Anything that can play a cue to completion.
///
/// Playing never fails from the caller's point of view: a cue that cannot
/// be synthesized or output is simply not heard.
pub trait CuePlayer {
    fn play_cue(&mut self, cue: CueId);
}
