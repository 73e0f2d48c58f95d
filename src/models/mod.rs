pub mod loaders;
pub mod question;
pub mod variant;
pub mod variant_spec;

pub use loaders::{load_question_bank, load_variant_spec};
pub use question::{OptionLabel, QuestionBank, QuestionRecord, SourceGroup, OPTION_COUNT};
pub use variant::{AnswerKey, AssembledQuestion, GeneratedVariant, Variant};
pub use variant_spec::{VariantSpec, DEFAULT_BOOKLET_ID_LEN};
