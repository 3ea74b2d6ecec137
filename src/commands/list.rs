//! List command implementation
//!
//! Lists installed extensions, every discovered extension, or the active
//! configuration objects of every collection.

use console::Style;

use crate::cli::ListArgs;
use crate::commands::helpers::open_site;
use crate::error::Result;
use crate::installer::{ExtensionIndex, Installer};
use crate::site::Site;
use crate::storage::collection_label;

/// Run list command
pub fn run(site: Option<std::path::PathBuf>, args: ListArgs) -> Result<()> {
    let site = open_site(site)?;
    let mut installer = site.installer()?;

    if args.config {
        list_config(&installer)
    } else if args.available {
        list_available(&site, &mut installer)
    } else {
        list_installed(&site, &mut installer, args.detailed)
    }
}

fn list_installed(site: &Site, installer: &mut Installer, detailed: bool) -> Result<()> {
    let index = ExtensionIndex::load(installer.factory_mut())?;
    let installed: Vec<_> = index.iter().collect();

    if installed.is_empty() {
        println!("No extensions installed.");
        return Ok(());
    }

    println!("Installed extensions ({}):", installed.len());
    println!();

    for (name, entry) in installed {
        let label = site
            .extensions
            .get(name)
            .map_or(name, |extension| extension.display_name());
        println!(
            "  {} {}",
            Style::new().bold().yellow().apply_to(name),
            Style::new().dim().apply_to(format!("({}, {})", label, entry.kind))
        );

        if detailed {
            let modified = installer.modified_config(name)?;
            for config in entry.owned_names() {
                if modified.iter().any(|m| m == config) {
                    println!("    {} {}", config, Style::new().red().apply_to("(modified)"));
                } else {
                    println!("    {}", config);
                }
            }
        } else {
            println!(
                "    {} {}",
                Style::new().bold().apply_to("Configuration:"),
                entry.config.len()
            );
        }
    }

    Ok(())
}

fn list_available(site: &Site, installer: &mut Installer) -> Result<()> {
    if site.extensions.is_empty() {
        println!("No extensions found.");
        return Ok(());
    }

    let installed = installer.installed_extensions()?;
    println!("Available extensions ({}):", site.extensions.len());
    println!();

    for extension in site.extensions.iter() {
        let marker = if installed.contains(&extension.name) {
            Style::new().green().apply_to("installed")
        } else {
            Style::new().dim().apply_to("not installed")
        };
        println!(
            "  {} {} [{}]",
            Style::new().bold().yellow().apply_to(&extension.name),
            extension.display_name(),
            marker
        );
        if !extension.dependencies.is_empty() {
            println!(
                "    {} {}",
                Style::new().bold().apply_to("Requires:"),
                extension.dependencies.join(", ")
            );
        }
    }

    Ok(())
}

fn list_config(installer: &Installer) -> Result<()> {
    let storage = installer.factory().storage();
    for collection in installer.list_collections()? {
        let names = storage.list_names(&collection)?;
        println!(
            "{} ({}):",
            Style::new().bold().apply_to(collection_label(&collection)),
            names.len()
        );
        for name in names {
            println!("  {}", name);
        }
    }
    Ok(())
}
