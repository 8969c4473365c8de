pub mod constant;
pub use constant::*;

pub mod operator;
pub use operator::*;

pub mod truth;
pub use truth::*;

pub mod expr;
pub use expr::*;

pub mod build;
pub use build::*;

pub mod input;
pub use input::*;

pub mod like;
pub use like::*;

pub mod eval;

pub mod wire;
pub use wire::*;
