pub mod answer_key;
pub mod document_writer;
pub mod matching_service;
pub mod option_shuffler;
pub mod validator;
pub mod warn_writer;

pub use answer_key::build_key;
pub use document_writer::{DocumentWriter, ManifestEntry};
pub use option_shuffler::{shuffle, ShuffledOptions};
pub use validator::{shortfall_warnings, validate};
pub use warn_writer::WarnWriter;
