//! Collections command implementation

use console::Style;

use crate::commands::helpers::open_site;
use crate::error::Result;
use crate::storage::collection_label;

/// Run collections command
///
/// Prints every collection known to the site, default first, with the
/// number of objects it holds.
pub fn run(site: Option<std::path::PathBuf>) -> Result<()> {
    let site = open_site(site)?;
    let installer = site.installer()?;
    let storage = installer.factory().storage();

    for collection in installer.list_collections()? {
        let count = storage.list_names(&collection)?.len();
        println!(
            "{} {}",
            Style::new().bold().apply_to(collection_label(&collection)),
            Style::new().dim().apply_to(format!("({count})"))
        );
    }
    Ok(())
}
