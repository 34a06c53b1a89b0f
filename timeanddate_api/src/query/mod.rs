mod common;
pub use self::common::{OutputFormat, Query};

mod dstlist;
pub use self::dstlist::{DstListOptions, DstListQuery};
