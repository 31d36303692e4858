pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in transaction::definitions()
        .into_iter()
        .chain(report::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}

/// Parses a positional transaction id argument.
pub(crate) fn parse_id(args: &[&str], usage: &str) -> Result<u32, CommandError> {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments(format!("Usage: {usage}")))?;
    raw.parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{raw}` is not a valid transaction id"))
        })
}
