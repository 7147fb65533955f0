pub mod compile;
pub mod init;
pub mod validate;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use validate::{validate, ValidateArgs};
