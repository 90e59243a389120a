pub mod document;
pub mod layout;
