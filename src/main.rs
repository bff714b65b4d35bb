use clap::error::ErrorKind;
use clap::Parser;

use commands::{transform, GlobalArgs};

mod commands;
mod output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "transform-files")]
#[command(version = VERSION)]
#[command(about = "Rewrite file contents and rename files across a directory tree")]
struct Cli {
    #[command(flatten)]
    transform: transform::TransformArgs,
    /// Print a JSON envelope instead of progress lines
    #[arg(long)]
    json: bool,
}

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            let _ = e.print();
            return std::process::ExitCode::from(1);
        }
    };

    let global = GlobalArgs { json: cli.json };
    let result = transform::run(cli.transform, &global);

    let (json_result, exit_code) = output::map_cmd_result_to_json(result);

    if global.json {
        let _ = output::print_json_result(json_result);
    } else if let Err(err) = &json_result {
        output::print_error_line(err);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
