// A field binds from exactly one variable

use envbind::EnvBind;

#[derive(EnvBind)]
struct Config {
    #[env("HOST")]
    #[env("OTHER_HOST")]
    pub host: String,
}

fn main() {}
