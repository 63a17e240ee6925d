use lispc::{cmdline, environment};

fn main() {
    pretty_env_logger::init();
    let mut env = environment::Environment::default();
    let args = std::env::args().collect();
    if let Err(e) = cmdline::launch(args, &mut env) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
