//! Init command implementation

use console::Style;

use crate::cli::InitArgs;
use crate::commands::helpers::resolve_site_path;
use crate::error::Result;
use crate::site::{SETTINGS_FILE, Site};

/// Run init command
pub fn run(site: Option<std::path::PathBuf>, args: InitArgs) -> Result<()> {
    let root = match args.path {
        Some(path) => path,
        None => resolve_site_path(site)?,
    };

    let existed = Site::exists(&root);
    let site = Site::init(&root)?;

    if existed {
        println!(
            "Site already initialized at {}",
            Style::new().bold().apply_to(site.root.display())
        );
    } else {
        println!(
            "{} {}",
            Style::new().green().bold().apply_to("Created"),
            site.root.join(SETTINGS_FILE).display()
        );
    }
    Ok(())
}
