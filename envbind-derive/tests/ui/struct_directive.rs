// Struct-level #[env] only accepts `implicit`

use envbind::EnvBind;

#[derive(EnvBind)]
#[env("APP")]
struct Config {
    #[env("HOST")]
    pub host: String,
}

fn main() {}
