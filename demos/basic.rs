//! Basic usage example

use envbind::EnvBind;
use std::time::Duration;

#[derive(Debug, Default, EnvBind)]
struct MySqlConfig {
    // Optional with a default
    #[env("MYSQL_HOST,default=localhost:3306")]
    pub host: String,

    #[env("MYSQL_USER,default=root")]
    pub user: String,

    // Optional without a default: stays empty when unset
    #[env("MYSQL_PASSWORD")]
    pub password: String,

    // Required: binding fails when unset
    #[env("MYSQL_DATABASE,required")]
    pub database: String,

    // Duration literal
    #[env("MYSQL_TIMEOUT,default=10s")]
    pub timeout: Duration,

    // Boolean type
    #[env("MYSQL_TLS_ENABLED")]
    pub tls: bool,

    // Numeric type
    #[env("MYSQL_MAX_CONNS")]
    pub max_conns: i32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Set environment variables for demonstration
    std::env::set_var("MYSQL_PASSWORD", "db_password");
    std::env::set_var("MYSQL_DATABASE", "db_name");
    std::env::set_var("MYSQL_TLS_ENABLED", "true");
    std::env::set_var("MYSQL_MAX_CONNS", "32");

    let mut config = MySqlConfig::default();
    envbind::bind(&mut config)?;

    println!("Configuration loaded:");
    println!("  Host: {}", config.host);
    println!("  User: {}", config.user);
    println!("  Password: {}", config.password);
    println!("  Database: {}", config.database);
    println!("  Timeout: {:?}", config.timeout);
    println!("  TLS: {}", config.tls);
    println!("  Max Connections: {}", config.max_conns);

    Ok(())
}
