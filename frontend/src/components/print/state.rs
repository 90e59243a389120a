use common::print_run::RunState;
use yew::Properties;

#[derive(Properties, PartialEq, Clone)]
pub struct PrintProps {
    /// Upload identifier taken from `/print/{upload}`.
    pub upload: String,
}

pub struct PrintComponent {
    /// Latest state reported by the run.
    pub run_state: RunState,

    /// Guard so the run starts only once, on first render.
    pub started: bool,
}

impl PrintComponent {
    pub fn new() -> Self {
        Self {
            run_state: RunState::Idle,
            started: false,
        }
    }
}
