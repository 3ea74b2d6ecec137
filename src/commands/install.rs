//! Install and reinstall command implementations

use console::Style;

use crate::cli::{InstallArgs, ReinstallArgs};
use crate::commands::helpers::open_site;
use crate::error::Result;
use crate::installer::{HookFailure, InstallReport};

/// Run install command
pub fn run(site: Option<std::path::PathBuf>, args: InstallArgs) -> Result<()> {
    let site = open_site(site)?;
    let order = site.install_order(&args.extensions)?;
    let mut installer = site.installer()?;

    let report = installer.install(&order)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_install_report(&report);
    }
    Ok(())
}

/// Run reinstall command
pub fn run_reinstall(site: Option<std::path::PathBuf>, args: ReinstallArgs) -> Result<()> {
    let site = open_site(site)?;
    let extensions = args
        .extensions
        .iter()
        .map(|name| site.extensions.require(name).cloned())
        .collect::<Result<Vec<_>>>()?;
    let mut installer = site.installer()?;

    let report = installer.reinstall(&extensions)?;

    for name in &report.uninstall.uninstalled {
        println!("{} {}", Style::new().yellow().apply_to("Uninstalled"), name);
    }
    print_hook_failures(&report.uninstall.hook_failures);
    print_install_report(&report.install);
    Ok(())
}

fn print_install_report(report: &InstallReport) {
    for name in &report.skipped {
        println!(
            "{} {} (already installed)",
            Style::new().dim().apply_to("Skipped"),
            name
        );
    }

    if report.installed.is_empty() {
        println!("Nothing to install.");
    } else {
        for name in &report.installed {
            println!("{} {}", Style::new().green().bold().apply_to("Installed"), name);
        }
        println!(
            "Wrote {} configuration object{}.",
            report.written_count(),
            if report.written_count() == 1 { "" } else { "s" }
        );
    }

    print_hook_failures(&report.hook_failures);
}

pub(crate) fn print_hook_failures(failures: &[HookFailure]) {
    for failure in failures {
        eprintln!(
            "{} {} hook for {}: {}",
            Style::new().yellow().bold().apply_to("Warning:"),
            failure.hook,
            failure.extension,
            failure.reason
        );
    }
}
