pub mod pages;

pub use pages::{discover_inputs, load_context, load_contexts, load_document};
