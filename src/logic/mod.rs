pub mod category_ops;
pub mod company_ops;
pub mod product_ops;
pub mod resolve;

pub use category_ops::*;
pub use company_ops::*;
pub use product_ops::*;
pub use resolve::*;
