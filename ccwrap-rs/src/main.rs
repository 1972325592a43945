use tracing::info;
use tracing_subscriber::EnvFilter;

use ccwrap::cli::{self, CliArgs};
use ccwrap::template::Templater;
use ccwrap::Error;

/// Environment variable holding `tracing` filter directives.
const LOG_ENV: &str = "CCWRAP_LOG";

fn main() {
    init_tracing();

    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("ccwrap: {e}");
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("ccwrap: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: CliArgs) -> Result<i32, Error> {
    let mut templater = Templater::new(args.mode, args.tool.as_str());
    let tool_args = templater.expand(&args.tool_args)?;
    info!("running `{}`", cli::command_line(&args.tool, &tool_args));
    Ok(cli::exec_tool(&args.tool, &tool_args)?)
}

/// Log to stderr, silently unless `CCWRAP_LOG` asks otherwise; stdout belongs
/// to the wrapped tool.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
