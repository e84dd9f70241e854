pub mod server;

pub use server::{RuntimeEnv, ServerConfig};
