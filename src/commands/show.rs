//! Show and delete command implementations

use console::Style;

use crate::cli::{DeleteArgs, ShowArgs};
use crate::commands::helpers::open_site;
use crate::error::{Result, config_not_found, config_protected};
use crate::installer::index::EXTENSION_CONFIG_NAME;
use crate::storage::{DEFAULT_COLLECTION, collection_label, validate_collection};

/// Run show command
pub fn run(site: Option<std::path::PathBuf>, args: ShowArgs) -> Result<()> {
    validate_collection(&args.collection)?;
    let site = open_site(site)?;
    let mut installer = site.installer()?;

    let config = installer
        .factory_mut()
        .get_in(&args.collection, &args.name)?;
    if config.is_new() {
        return Err(config_not_found(
            collection_label(&args.collection),
            &args.name,
        ));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(config.get_all())?);
    } else {
        print!("{}", serde_yaml::to_string(config.get_all())?);
    }
    Ok(())
}

/// Run delete command
///
/// The extension ledger cannot be deleted here; uninstall the extensions
/// instead.
pub fn run_delete(site: Option<std::path::PathBuf>, args: DeleteArgs) -> Result<()> {
    validate_collection(&args.collection)?;
    if args.collection == DEFAULT_COLLECTION && args.name == EXTENSION_CONFIG_NAME {
        return Err(config_protected(&args.name));
    }
    let site = open_site(site)?;
    let mut installer = site.installer()?;

    if !installer
        .factory_mut()
        .delete_name(&args.collection, &args.name)?
    {
        return Err(config_not_found(
            collection_label(&args.collection),
            &args.name,
        ));
    }

    println!(
        "{} {} from {}",
        Style::new().green().bold().apply_to("Deleted"),
        args.name,
        collection_label(&args.collection)
    );
    Ok(())
}
