use clap::{App, Arg};
use lc3::{install_interrupt_handler, load, run, Config, Outcome, TerminalGuard};
use std::path::PathBuf;
use std::process;

fn main() {
    let app = App::new("LC-3 VM").arg(
        Arg::with_name("PROGRAM")
            .help("One or more object files to load, in order.")
            .multiple(true)
            .index(1),
    );

    let matches = app.get_matches();

    let image_paths: Vec<PathBuf> = match matches.values_of("PROGRAM") {
        Some(values) => values.map(PathBuf::from).collect(),
        None => {
            println!("usage: lc3 [image-file]...");
            process::exit(2);
        }
    };

    // Images are loaded before the terminal is touched at all, so a load
    // failure here never leaves raw mode enabled and never needs a guard.
    let mut machine = load(&Config::new(image_paths)).unwrap_or_else(|err| {
        println!("Application error: {err}");
        process::exit(1);
    });

    install_interrupt_handler();

    let terminal_guard = TerminalGuard::enable_raw_mode().unwrap_or_else(|err| {
        eprintln!("failed to configure terminal: {err}");
        process::exit(1);
    });

    let outcome = run(&mut machine);

    // process::exit skips destructors, so the guard is dropped by hand here
    // to restore the terminal before the process actually ends.
    drop(terminal_guard);

    match outcome {
        Outcome::Halted => process::exit(0),
        Outcome::Interrupted => {
            println!();
            process::exit(254);
        }
    }
}
