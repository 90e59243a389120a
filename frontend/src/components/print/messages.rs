use common::print_run::{Route, RunState};

pub enum Msg {
    /// The print run moved to a new state.
    Progress(RunState),
    /// The run is over; leave the page.
    Finished(Route),
}
