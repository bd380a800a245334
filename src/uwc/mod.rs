pub mod config;
pub mod core;
pub mod cursor;
pub mod error;
pub mod normalize;
pub mod partition;
pub mod tokenize;
pub mod vocab;
pub mod worker;


pub use self::config::*;
pub use self::core::*;
pub use self::cursor::*;
pub use self::error::*;
pub use self::normalize::*;
pub use self::partition::*;
pub use self::tokenize::*;
pub use self::vocab::*;
pub use self::worker::*;
