pub mod check;
pub mod config_info;
pub mod fix;
pub mod init;
pub mod util;

pub use check::*;
pub use config_info::*;
pub use fix::*;
pub use init::*;
pub use util::*;
