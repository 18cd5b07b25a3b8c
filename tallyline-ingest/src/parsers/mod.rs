pub mod boa_statement;

pub use boa_statement::{
    LayoutRules, SectionOutcome, SectionStatus, SectionSubtotal, StatementExtract,
    StatementLayout, StatementParser,
};
