pub mod category;
pub mod common;
pub mod company;
pub mod product;

pub use category::*;
pub use common::*;
pub use company::*;
pub use product::*;
