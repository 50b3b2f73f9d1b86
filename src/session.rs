/// One playthrough: owns the `GameState` and routes each choice through
/// the state machine and then the renderer.

use tracing::error;

use crate::domain::cue::CuePlayer;
use crate::domain::error::EngineError;
use crate::domain::scene::SceneStore;
use crate::domain::transition::TransitionTable;
use crate::sim::machine::apply_choice;
use crate::sim::state::GameState;
use crate::timing::Pacer;
use crate::ui::renderer::Presenter;
use crate::ui::surface::Surface;

pub struct Session<'a, C: CuePlayer, P: Pacer> {
    store: &'a SceneStore,
    table: &'a TransitionTable,
    state: GameState,
    cues: C,
    presenter: Presenter<P>,
}

impl<'a, C: CuePlayer, P: Pacer> Session<'a, C, P> {
    pub fn new(
        store: &'a SceneStore,
        table: &'a TransitionTable,
        cues: C,
        presenter: Presenter<P>,
    ) -> Self {
        Session {
            store,
            table,
            state: GameState::new(),
            cues,
            presenter,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Render the current scene without applying a choice.
    pub fn open(
        &mut self,
        primary: &mut dyn Surface,
        secondary: &mut dyn Surface,
    ) -> Result<(), EngineError> {
        let scene = self.store.get_scene(self.state.current_scene)?;
        self.presenter.render(primary, secondary, scene, &self.state, None)
    }

    /// Apply a choice and re-render both surfaces.
    ///
    /// A gap in the transition table is fatal in debug builds and ignored
    /// (logged, nothing redrawn) in release builds.
    pub fn choose(
        &mut self,
        choice: u8,
        primary: &mut dyn Surface,
        secondary: &mut dyn Surface,
    ) -> Result<(), EngineError> {
        self.resolve(choice, primary, secondary, cfg!(debug_assertions))
    }

    fn resolve(
        &mut self,
        choice: u8,
        primary: &mut dyn Surface,
        secondary: &mut dyn Surface,
        unmapped_is_fatal: bool,
    ) -> Result<(), EngineError> {
        let directive = match apply_choice(self.table, &mut self.state, choice, &mut self.cues) {
            Ok(d) => d,
            Err(e @ EngineError::UnmappedChoice { .. }) => return on_unmapped(e, unmapped_is_fatal),
            Err(e) => return Err(e),
        };
        let scene = self.store.get_scene(directive.scene)?;
        self.presenter
            .render(primary, secondary, scene, &self.state, directive.feedback)
    }
}

fn on_unmapped(e: EngineError, fatal: bool) -> Result<(), EngineError> {
    if fatal {
        return Err(e);
    }
    error!(error = %e, "ignoring unmapped choice");
    Ok(())
}
