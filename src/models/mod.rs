pub mod forecast;
pub mod insight;
pub mod role;
pub mod settings;
pub mod weather;

pub use forecast::*;
pub use insight::*;
pub use role::*;
pub use settings::*;
pub use weather::*;
