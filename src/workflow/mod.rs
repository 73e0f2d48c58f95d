pub mod variant_assembler;
pub mod variant_ctx;

pub use variant_assembler::{assemble, VariantAssembler};
pub use variant_ctx::VariantCtx;
