pub use self::{cell::*, cell_set::*};

mod cell;
mod cell_set;
