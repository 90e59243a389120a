/// Observable progress of a print run, in the order a run moves through them.
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    Idle,
    /// Loading the document descriptor and the PDF bytes.
    Gathering,
    /// Submitting `page` of `total_pages`.
    Printing { page: u32, total_pages: u32 },
    /// Waiting for the printer to go idle after `page` was accepted.
    Polling {
        page: u32,
        total_pages: u32,
        preview: String,
    },
    /// `page` printed and was confirmed.
    Advancing { page: u32, total_pages: u32 },
    TimedOut { page: u32 },
    Failed { message: String },
    Done { filename: String },
    Redirecting,
}

/// Where the kiosk goes once a run is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Success { filename: String, upload: String },
}
