use crate::cli::args::CliArgs;

/// Checks that only make sense on the flags themselves. Values that can also
/// come from the config file are checked after merging.
pub fn validate(args: &CliArgs) -> Result<(), String> {
    if !args.batch {
        if args.page.is_some() {
            return Err("--page only applies together with --batch".to_string());
        }
        if args.format.is_some() {
            return Err("--format only applies together with --batch".to_string());
        }
    }
    Ok(())
}
