//! Startup-time binding that aborts on any failure

use envbind::EnvBind;

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[env("HOST,required")]
    pub host: String,

    #[env("PORT,default=8080")]
    pub port: u16,
}

fn main() {
    std::env::set_var("HOST", "0.0.0.0");

    let mut config = Config::default();
    envbind::must_bind(&mut config);

    println!("Listening on {}:{}", config.host, config.port);

    // Without HOST the same call panics with "envbind: HOST not set".
    std::env::remove_var("HOST");
    let result = std::panic::catch_unwind(|| envbind::must_bind(&mut Config::default()));
    println!("Bind without HOST panicked: {}", result.is_err());
}
