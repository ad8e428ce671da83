// Positional fields have no name to report in errors

use envbind::EnvBind;

#[derive(EnvBind)]
struct Port(#[env("PORT")] u16);

fn main() {}
