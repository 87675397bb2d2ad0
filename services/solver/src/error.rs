use derive_more::Display;

#[derive(Debug, Display)]
pub enum ServerError {
    #[display(fmt = "Config Error: {}", _0)]
    ConfigError(String),

    #[display(fmt = "Invalid listen address: {}", _0)]
    InvalidAddress(String),

    #[display(fmt = "Invalid mode \"{}\", expected tcp or udp", _0)]
    InvalidMode(String),

    #[display(fmt = "IO Error: {}", _0)]
    IOError(String),
}

impl std::error::Error for ServerError {}

impl From<::config::ConfigError> for ServerError {
    fn from(e: ::config::ConfigError) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(e: std::net::AddrParseError) -> Self {
        Self::InvalidAddress(e.to_string())
    }
}

impl From<std::io::Error> for ServerError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e.to_string())
    }
}
