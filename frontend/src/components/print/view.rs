//! Rendering of the print page: a status line, a progress bar while sheets
//! are going out, and the preview of the sheet currently printing.

use super::state::PrintComponent;
use common::print_run::RunState;
use yew::prelude::*;

pub fn view(component: &PrintComponent, _ctx: &Context<PrintComponent>) -> Html {
    let state = &component.run_state;
    let failed = matches!(state, RunState::Failed { .. } | RunState::TimedOut { .. });

    html! {
        <div class="kiosk-page print">
            <h1 class={classes!("status", failed.then_some("error"))}>{ describe(state) }</h1>
            { progress_bar(state) }
            { preview(state) }
        </div>
    }
}

/// One-line, user-facing description of a run state.
pub fn describe(state: &RunState) -> String {
    match state {
        RunState::Idle => "Waiting to start...".to_string(),
        RunState::Gathering => "Preparing your document...".to_string(),
        RunState::Printing { page, total_pages } => {
            format!("Sending page {} of {} to the printer...", page, total_pages)
        }
        RunState::Polling {
            page, total_pages, ..
        } => format!("Printing page {} of {}...", page, total_pages),
        RunState::Advancing { page, total_pages } => {
            format!("Page {} of {} printed", page, total_pages)
        }
        RunState::TimedOut { page } => format!("Printer stopped responding on page {}", page),
        RunState::Failed { message } => message.clone(),
        RunState::Done { filename } => format!("{} printed", filename),
        RunState::Redirecting => "Returning home...".to_string(),
    }
}

/// Completed share of the batch, in percent, for states tied to a page.
fn progress(state: &RunState) -> Option<u32> {
    let (done, total) = match state {
        RunState::Printing { page, total_pages } | RunState::Polling { page, total_pages, .. } => {
            (page.saturating_sub(1), *total_pages)
        }
        RunState::Advancing { page, total_pages } => (*page, *total_pages),
        _ => return None,
    };
    (total > 0).then(|| done * 100 / total)
}

fn progress_bar(state: &RunState) -> Html {
    match progress(state) {
        Some(percent) => html! {
            <progress class="progress" max="100" value={percent.to_string()} />
        },
        None => html! {},
    }
}

fn preview(state: &RunState) -> Html {
    match state {
        RunState::Polling { preview, page, .. } => html! {
            <img class="preview" src={preview.clone()} alt={format!("Page {}", page)} />
        },
        _ => html! {},
    }
}
