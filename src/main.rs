use std::process::ExitCode;

use role_matrix::AppError;
use role_matrix::config::Config;
use role_matrix::models::data_manager::export::export_json;
use role_matrix::seed;

const USAGE: &str = "usage: role-matrix [export|roles|role <id>|matrix|audit]";

enum Command {
    Export,
    Roles,
    Role(String),
    Matrix,
    Audit,
}

impl Command {
    fn parse(arg: Option<&str>, id: Option<String>) -> Option<Self> {
        match arg.unwrap_or("export") {
            "export" => Some(Command::Export),
            "roles" => Some(Command::Roles),
            "role" => id.map(Command::Role),
            "matrix" => Some(Command::Matrix),
            "audit" => Some(Command::Audit),
            _ => None,
        }
    }
}

fn run(command: Command) -> Result<(), AppError> {
    let config = Config::from_env();
    let store = seed::build_store(&config)?;

    let out = match command {
        Command::Export => export_json(&store)?,
        Command::Roles => serde_json::to_string_pretty(&store.list_roles())?,
        Command::Role(id) => serde_json::to_string_pretty(store.require_role(&id)?)?,
        Command::Matrix => serde_json::to_string_pretty(store.access_matrix())?,
        Command::Audit => serde_json::to_string_pretty(&store.audit().entries().collect::<Vec<_>>())?,
    };
    println!("{out}");
    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let arg = args.next();
    let Some(command) = Command::parse(arg.as_deref(), args.next()) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
