pub mod blocks;
pub mod clock;
pub mod config;
pub mod error;
pub mod files;
pub mod permissions;
pub mod shell;
pub mod storage;
pub mod system;
pub mod users;

pub use config::StoreConfig;
pub use error::FatError;
pub use system::FatSystem;
