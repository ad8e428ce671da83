//! Aggregated errors under a custom namespace

use envbind::{Binder, EnvBind, FieldError};

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[env("ORDERS_DATABASE_URL,required")]
    pub database_url: String,

    #[env("ORDERS_WORKERS,default=4")]
    pub workers: u8,

    #[env("ORDERS_SHUTDOWN_GRACE,default=30s")]
    pub shutdown_grace: std::time::Duration,
}

fn main() {
    std::env::remove_var("ORDERS_DATABASE_URL");
    std::env::set_var("ORDERS_WORKERS", "1000");
    std::env::set_var("ORDERS_SHUTDOWN_GRACE", "soon");

    let binder = Binder::new().with_namespace("orders");
    let mut config = Config::default();

    match binder.bind(&mut config) {
        Ok(()) => println!("Loaded: {config:?}"),
        Err(err) => {
            println!("{} problem(s): {err}", err.len());
            for error in &err {
                match error {
                    FieldError::Missing { key, .. } => println!("  - set {key}"),
                    FieldError::Invalid { key, source, .. } => println!("  - fix {key}: {source}"),
                }
            }
        }
    }
}
