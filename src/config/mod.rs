pub mod paths;
pub mod settings;
pub mod user;

pub use paths::AppPaths;
pub use settings::Settings;
pub use user::resolve_user;

use crate::error::AppResult;

pub fn load_settings(paths: &AppPaths, user_id: &str) -> AppResult<Settings> {
    settings::load(paths.settings_file(user_id))
}
