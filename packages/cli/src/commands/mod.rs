pub mod edit;
pub mod export;
pub mod project;
pub mod show;

pub use edit::{image, set, ImageArgs, SetArgs};
pub use export::{export, ExportArgs};
pub use project::{load, reset, save, LoadArgs, ResetArgs, SaveArgs};
pub use show::{show, ShowArgs};

use crate::config::Config;
use anyhow::Result;
use flyer_editor::{DirectoryStore, FlyerEditor};

/// Editor over the store directory named by the config in `cwd`
pub fn open_editor(cwd: &str) -> Result<(Config, FlyerEditor<DirectoryStore>)> {
    let config = Config::load(cwd)?;
    let store = DirectoryStore::open(config.get_store_dir(cwd))?;
    let editor = FlyerEditor::new(config.editor.clone(), store);
    Ok((config, editor))
}
