//! Business entities and the pure logic over them, free of actor plumbing.

pub mod cart;
pub mod listing;
pub mod money;
pub mod order;
pub mod product;
pub mod user;

pub use cart::*;
pub use listing::*;
pub use money::*;
pub use order::*;
pub use product::*;
pub use user::*;
