//! Deriving keys from field names for fields without a directive

use envbind::{Binder, EnvBind};

#[derive(Debug, Default, EnvBind)]
#[env(implicit)]
struct Config {
    // Explicit key still works alongside implicit ones
    #[env("SERVICE_NAME,default=orders")]
    pub name: String,

    // Reads MAX_CONNS
    pub max_conns: u32,

    // Reads DEBUG_MODE
    pub debug_mode: bool,

    // Never bound, even with implicit keys
    #[env("-")]
    pub peers: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MAX_CONNS", "64");
    std::env::set_var("DEBUG_MODE", "t");

    let binder = Binder::new().with_implicit_keys(true);

    let mut config = Config::default();
    binder.bind(&mut config)?;

    println!("Configuration with implicit keys:");
    println!("  Name: {}", config.name);
    println!("  Max Connections: {}", config.max_conns);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Peers: {:?}", config.peers);

    Ok(())
}
