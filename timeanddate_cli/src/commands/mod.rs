pub mod dstlist;
