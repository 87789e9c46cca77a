use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let host = env::var("DB_HOST").expect("DB_HOST must be set");
        let port = env::var("DB_PORT").unwrap_or_else(|_| "3306".to_string());
        let user = env::var("DB_USER").expect("DB_USER must be set");
        let password = env::var("DB_PASSWORD").expect("DB_PASSWORD must be set");
        let name = env::var("DB_NAME").expect("DB_NAME must be set");

        Self {
            database_url: format!("mysql://{user}:{password}@{host}:{port}/{name}"),
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
        }
    }
}
