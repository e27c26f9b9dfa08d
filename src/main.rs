use std::process::ExitCode;

use dirslice::output as out;
use dirslice::DirSliceError;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = dirslice::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            let code = e
                .downcast_ref::<DirSliceError>()
                .map(DirSliceError::code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
