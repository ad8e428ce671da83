// Unions have no independently bindable fields

use envbind::EnvBind;

#[derive(EnvBind)]
union Port {
    number: u16,
}

fn main() {}
