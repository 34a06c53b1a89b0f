mod auth;
mod client;
mod errors;
mod parse;
mod query;
pub mod types;
mod validate;
pub use self::auth::Authentication;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{DstListOptions, DstListQuery, OutputFormat, Query};
