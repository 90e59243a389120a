//! Types shared between the kiosk backend and the kiosk frontend.
//!
//! - [`model`]: the document descriptor and its layout parameters.
//! - [`requests`]: payloads the frontend sends.
//! - [`jobs`]: payloads the backend answers with.
//! - [`print_run`]: the client-side state machine that prints a whole
//!   document one page at a time.

pub mod jobs;
pub mod model;
pub mod print_run;
pub mod requests;
