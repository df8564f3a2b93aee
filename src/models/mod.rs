pub mod account;

pub use account::{Account, AccountPatch, AccountResponse, NewAccount};
