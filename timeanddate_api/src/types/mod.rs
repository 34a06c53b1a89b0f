mod dst;
pub use self::dst::{Country, DstEntry, Place, TdTimeZone, TimeChange};
