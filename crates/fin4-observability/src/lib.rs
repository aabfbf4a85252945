mod aggregation;
mod blockchain;

pub use aggregation::*;
pub use blockchain::*;
