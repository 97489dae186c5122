pub mod bill;
pub mod category;
pub mod dashboard;
pub mod document;
pub mod ledger;
pub mod reminder;
pub mod report;
pub mod settings;
pub mod system;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(dashboard::definitions());
    commands.extend(bill::definitions());
    commands.extend(category::definitions());
    commands.extend(reminder::definitions());
    commands.extend(document::definitions());
    commands.extend(report::definitions());
    commands.extend(settings::definitions());
    commands.extend(ledger::definitions());
    commands
}
