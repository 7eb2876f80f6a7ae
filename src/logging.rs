// Copyright (C) 2020-2024 Andy Kurnia.

use super::error;

// Sends log records to stderr, so board output on stdout stays clean. A
// log_file, if given, also gets everything down to debug.
pub fn init(level: log::LevelFilter, log_file: Option<&str>) -> error::Returns<()> {
    let log_dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}[{}][{}] {}",
            chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
            record.target(),
            record.level(),
            message
        ))
    });
    let log_dispatcher = match log_file {
        Some(log_file) => log_dispatcher.chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Debug)
                .chain(fern::log_file(log_file)?),
        ),
        None => log_dispatcher,
    };
    log_dispatcher
        .chain(fern::Dispatch::new().level(level).chain(std::io::stderr()))
        .apply()?;
    Ok(())
}
