pub mod accounts;
pub mod passwords;
