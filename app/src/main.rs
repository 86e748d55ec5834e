use hole_app::logging::init_logging;
use hole_app::{App, ConfigSources, Env, PluginRegistry, StatusCode};

fn main() {
    init_logging();

    match run() {
        Ok(status) => std::process::exit(status.exit_code()),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(StatusCode::InvalidCommand.exit_code());
        }
    }
}

fn run() -> hole_app::Result<StatusCode> {
    let env = Env::current()?;
    let sources = ConfigSources::discover(&env);

    let mut app = App::bootstrap(env, &PluginRegistry::builtin(), &sources)?;
    app.init()?;
    let bundle = app.execute_raw_args(std::env::args().skip(1))?;
    app.destroy()?;

    let output = bundle.output();
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(bundle.status())
}
