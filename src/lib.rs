pub mod expression;
pub use expression::{
    Constant,
    Expression,
    FALSE,
    Input,
    Operator,
    TRUE,
    Truth,
    WireError,
};

pub mod logic;
pub use logic::{
    EquivalenceError,
    assert_equivalence,
    find_diff,
    implies,
    minimized_dnf,
};
