// The directive must be a single string literal

use envbind::EnvBind;

#[derive(EnvBind)]
struct Config {
    #[env(PORT)]
    pub port: u16,
}

fn main() {}
