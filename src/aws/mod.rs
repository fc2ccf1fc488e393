pub mod credentials;
pub mod sigv4;
