pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "todolist";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Everything `serve` needs to start
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub mongo_uri: String,
    pub database: String,
    pub in_memory: bool,
}
