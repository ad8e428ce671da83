//! Implementing `Record` by hand instead of deriving it

use envbind::{AsSlot, Field, Record, Slot};
use std::time::Duration;

#[derive(Debug, Default)]
struct Config {
    pub endpoint: String,
    pub retries: u8,
    pub backoff: Duration,
    pub jitter: f64,
}

impl Record for Config {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("endpoint", Some("API_ENDPOINT,required"), self.endpoint.as_slot()),
            Field::new("retries", Some("API_RETRIES,default=3"), self.retries.as_slot()),
            Field::new("backoff", Some("API_BACKOFF,default=250ms"), self.backoff.as_slot()),
            // f64 has no coercion, so the field must be skipped
            Field::new("jitter", Some("-"), Slot::unsupported::<f64>()),
        ]
    }
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("API_ENDPOINT", "https://api.example.com");

    let config = Config::from_env()?;

    println!("Hand-written record:");
    println!("  Endpoint: {}", config.endpoint);
    println!("  Retries: {}", config.retries);
    println!("  Backoff: {:?}", config.backoff);
    println!("  Jitter: {}", config.jitter);

    Ok(())
}
