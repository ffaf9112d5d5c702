use annual_calendar::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Annual Calendar - Almanac Ephemeris Parser");
    println!("==========================================");
    println!();
    println!("Parse German-language almanac exports (one fixed-width ephemeris");
    println!("table per object) into structured data for an annual calendar.");
    println!();
    println!("USAGE:");
    println!("    annual-calendar <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse an export file and summarise its object blocks");
    println!("    objects     List the known objects and their aliases");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse an export and show the observer coordinate:");
    println!("    annual-calendar parse Ephemeriden-2024.txt --show-coordinate");
    println!();
    println!("    # Keep going when an object block is broken:");
    println!("    annual-calendar parse Ephemeriden-2024.txt --skip-invalid-blocks -v");
    println!();
    println!("For detailed help on any command, use:");
    println!("    annual-calendar <COMMAND> --help");
}
