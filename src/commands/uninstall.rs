//! Uninstall command implementation

use console::Style;

use crate::cli::UninstallArgs;
use crate::commands::helpers::open_site;
use crate::commands::install::print_hook_failures;
use crate::error::{ConfsyncError, Result};
use crate::extension::sort::dependents;

/// Run uninstall command
///
/// Refuses to uninstall an extension that another installed extension, not
/// being uninstalled with it, still requires.
pub fn run(site: Option<std::path::PathBuf>, args: UninstallArgs) -> Result<()> {
    let site = open_site(site)?;
    let mut installer = site.installer()?;
    let installed = installer.installed_extensions()?;

    for name in &args.extensions {
        let blocking: Vec<String> = dependents(name, &installed, &site.extensions)
            .into_iter()
            .filter(|dependent| !args.extensions.contains(dependent))
            .collect();
        if !blocking.is_empty() {
            return Err(ConfsyncError::RequiredByInstalled {
                extension: name.clone(),
                dependents: blocking.join(", "),
            });
        }
    }

    let ids: Vec<&str> = args.extensions.iter().map(String::as_str).collect();
    let report = installer.uninstall(&ids)?;

    for name in &report.uninstalled {
        println!("{} {}", Style::new().green().bold().apply_to("Uninstalled"), name);
    }
    println!(
        "Deleted {} configuration object{}.",
        report.deleted.len(),
        if report.deleted.len() == 1 { "" } else { "s" }
    );
    print_hook_failures(&report.hook_failures);
    Ok(())
}
