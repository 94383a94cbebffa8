//! Implementation of the `paralix placeholders` command.

use crate::cli::PlaceholdersArgs;
use paralix::error::Result;
use paralix::placeholder;

/// Print each placeholder name of the template, one per line.
pub fn cmd_placeholders(args: PlaceholdersArgs) -> Result<()> {
    let set = placeholder::extract(&args.execute);
    if set.is_empty() {
        eprintln!("no <PLACEHOLDER> tokens in '{}'", args.execute);
    }
    for name in set.iter() {
        println!("{}", name);
    }
    Ok(())
}
