pub mod models;
pub mod enums;
pub mod results;

pub use models::*;
pub use enums::*;
pub use results::*;
