//! Top-level page selection.
//!
//! The kiosk has three pages, picked from the browser path on load:
//! - `/print/{upload}`: prints the given upload (see `PrintComponent`).
//! - `/success?filename=&upload=`: shown after a complete batch.
//! - anything else: the idle home screen.
//!
//! Pages change through full navigations, so no client-side router is needed.

use crate::components::print::PrintComponent;
use web_sys::UrlSearchParams;
use yew::{html, Component, Context, Html};

#[derive(Debug, Clone, PartialEq)]
enum Page {
    Home,
    Print { upload: String },
    Success { filename: String },
}

impl Page {
    fn from_location(path: &str, query: &str) -> Self {
        if let Some(upload) = path.strip_prefix("/print/") {
            let upload = upload.trim_end_matches('/');
            if !upload.is_empty() {
                return Page::Print {
                    upload: upload.to_string(),
                };
            }
        }

        if path.trim_end_matches('/') == "/success" {
            let filename = UrlSearchParams::new_with_str(query)
                .ok()
                .and_then(|params| params.get("filename"))
                .unwrap_or_default();
            return Page::Success { filename };
        }

        Page::Home
    }

    fn current() -> Self {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return Page::Home;
        };
        let path = location.pathname().unwrap_or_default();
        let query = location.search().unwrap_or_default();
        Self::from_location(&path, &query)
    }
}

pub struct App {
    page: Page,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            page: Page::current(),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        match &self.page {
            Page::Print { upload } => html! {
                <PrintComponent upload={upload.clone()} />
            },
            Page::Success { filename } => html! {
                <div class="kiosk-page success">
                    <h1>{ "Done!" }</h1>
                    <p>{ format!("{} was printed. Please take your pages.", filename) }</p>
                </div>
            },
            Page::Home => html! {
                <div class="kiosk-page home">
                    <h1>{ "Print Kiosk" }</h1>
                    <p>{ "Scan the code shown after uploading your document to start printing." }</p>
                </div>
            },
        }
    }
}
