pub mod toml_loader;

pub use toml_loader::{
    load_question_bank, load_source_group, load_variant_spec, parse_source_group,
    parse_variant_spec, resolve_correct_label,
};
