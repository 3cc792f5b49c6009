mod error;
mod routines;

use std::process::ExitCode;

use dynseq_log::{
    self as log,
    CustomFmt,
    Filter,
    Level,
    LevelFmt,
    LogFmt,
    Color,
    error,
    info,
};

fn main() -> ExitCode {
    if let Err(err) = log::init_with(Filter::from_env_or("info")) {
        eprintln!("failed to initialize logger: {}", err);
    }
    let summary_fmt = LogFmt::labeled("SUMMARY", Color::Cyan)
        .and_then(log::custom_fmt);
    let routines = match routines::all() {
        Ok(routines) => routines,
        Err(err) => {
            error!("failed to collect routines: {}", err);
            return ExitCode::FAILURE
        },
    };
    let mut failed = 0;
    for routine in &routines {
        match (routine.run)() {
            Ok(()) => {
                info!("{} passed", routine.name);
            },
            Err(err) => {
                failed += 1;
                error!("{} failed: {}", routine.name, err);
            },
        }
    }
    report_summary(summary_fmt, routines.len() - failed, routines.len());
    if failed == 0 {
        ExitCode::SUCCESS
    }
    else {
        ExitCode::FAILURE
    }
}

/// Logs the pass count through the summary format, falling back to an
/// error line that names the reason when that format is unusable.
fn report_summary(summary_fmt: log::Result<CustomFmt>, passed: usize, total: usize) -> bool {
    let written = summary_fmt.and_then(|fmt| log::log(
        module_path!(),
        LevelFmt::Other(fmt, Level::Always),
        format_args!("{} of {} routines passed", passed, total),
    ));
    match written {
        Ok(written) => written,
        Err(err) => {
            error!("summary line unavailable ({}): {} of {} routines passed", err, passed, total)
        },
    }
}
