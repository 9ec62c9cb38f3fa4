pub mod chain;
pub mod key;
pub mod list;
pub mod pipeline;
pub mod stage;
pub mod tidy;
pub mod value;

#[doc(hidden)]
pub mod testing {
    pub mod stage_contract;
}

pub use chain::chain_operations;
pub use key::{DEFAULT_DELIMITER, create_surrogate_key};
pub use list::flatten_nested_list;
pub use stage::case::{
    CaseCategory, LowerCase, UpperCase, check_case, match_case, try_check_case, try_match_case,
};
pub use stage::normalize_whitespace::{
    ADD_LEADING_SPACE, ADD_TRAILING_SPACE, NormalizeWhitespace, REMOVE_LEADING_SPACE,
    REMOVE_TRAILING_SPACE, normalize_whitespace,
};
pub use stage::proper_case::{ALWAYS_LOWERCASE, ProperCase, proper_case};
pub use stage::replace_all::{Guard, ReplaceAll, Replacement, ReplacementSet, replace_all};
pub use stage::squish::{Squish, squish};
pub use stage::{Stage, StageError};
pub use tidy::{Tidy, TidyError};
pub use value::Value;
