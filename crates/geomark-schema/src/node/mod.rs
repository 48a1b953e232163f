mod collection;
mod field;
mod rule;
mod schema;

pub use collection::*;
pub use field::*;
pub use rule::*;
pub use schema::*;

use crate::error::ErrorTree;

///
/// ValidateNode
///

pub trait ValidateNode {
    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}
