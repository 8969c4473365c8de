pub mod negate;

pub mod minimize;

pub mod dnf;
pub use dnf::*;

pub mod implies;
pub use implies::*;

pub mod witness;
pub use witness::*;

pub mod assert;
pub use assert::*;
