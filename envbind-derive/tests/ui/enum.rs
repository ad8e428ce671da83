// Only structs with named fields can be bound

use envbind::EnvBind;

#[derive(EnvBind)]
enum Mode {
    Dev,
    Prod,
}

fn main() {}
