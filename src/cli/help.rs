use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Commands");
    for entry in registry.iter() {
        println!("  {:<10} {}", entry.name, entry.description);
    }
    println!("\n  Use `help <command>` for usage details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(entry.name);
    println!("  {}", entry.description);
    println!("  Usage: {}", entry.usage);
}
