pub mod codecogs_client;

pub use codecogs_client::CodecogsClient;
