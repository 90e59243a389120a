//! Print page: drives one `PrintRun` for the upload in the URL.
//!
//! On first render the component spawns the run with the browser
//! implementations from `api`. Every state the run reports is forwarded as
//! `Msg::Progress` and rendered by `view`; when the run ends the page
//! navigates to the success page or back home.

mod api;
mod messages;
mod state;
mod view;

use api::{GlooTimer, HttpBackend, HttpUploadService};
use common::print_run::{PrintRun, Route};
use gloo_console::{error, log};
use yew::platform::spawn_local;
use yew::prelude::*;

pub use messages::Msg;
pub use state::{PrintComponent, PrintProps};

impl Component for PrintComponent {
    type Message = Msg;
    type Properties = PrintProps;

    fn create(_ctx: &Context<Self>) -> Self {
        PrintComponent::new()
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Progress(run_state) => {
                log!(format!("print run: {}", view::describe(&run_state)));
                self.run_state = run_state;
                true
            }
            Msg::Finished(route) => {
                navigate(&route);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.started {
            self.started = true;

            let link = ctx.link().clone();
            let upload = ctx.props().upload.clone();
            spawn_local(async move {
                let backend = HttpBackend;
                let uploads = HttpUploadService;
                let timer = GlooTimer;

                let progress = link.clone();
                let route = PrintRun::new(upload, &backend, &uploads, &timer)
                    .execute(move |run_state| progress.send_message(Msg::Progress(run_state.clone())))
                    .await;
                link.send_message(Msg::Finished(route));
            });
        }
    }
}

/// `/success?filename=&upload=` or `/`.
fn route_href(route: &Route) -> String {
    match route {
        Route::Home => "/".to_string(),
        Route::Success { filename, upload } => format!(
            "/success?filename={}&upload={}",
            String::from(js_sys::encode_uri_component(filename)),
            String::from(js_sys::encode_uri_component(upload)),
        ),
    }
}

fn navigate(route: &Route) {
    let href = route_href(route);
    let Some(window) = web_sys::window() else {
        error!("no window to navigate with");
        return;
    };
    if let Err(e) = window.location().set_href(&href) {
        error!(format!("could not navigate to {}: {:?}", href, e));
    }
}
