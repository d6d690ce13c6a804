use std::path::{Path, PathBuf};

use tauri::{image::Image, AppHandle, Manager};

pub(crate) fn is_packaged() -> bool {
    cfg!(feature = "custom-protocol")
}

fn development_assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

pub(crate) fn resources_root(packaged: bool, resource_dir: Option<PathBuf>) -> PathBuf {
    match (packaged, resource_dir) {
        (true, Some(resource_dir)) => resource_dir.join("assets"),
        _ => development_assets_dir(),
    }
}

pub(crate) fn asset_path<P>(root: &Path, parts: &[P]) -> PathBuf
where
    P: AsRef<Path>,
{
    parts
        .iter()
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

pub(crate) fn resolve_asset_path<P>(app_handle: &AppHandle, parts: &[P]) -> PathBuf
where
    P: AsRef<Path>,
{
    let resource_dir = app_handle.path().resource_dir().ok();
    asset_path(&resources_root(is_packaged(), resource_dir), parts)
}

pub(crate) fn load_window_icon<P, F>(
    app_handle: &AppHandle,
    parts: &[P],
    log: F,
) -> Option<Image<'static>>
where
    P: AsRef<Path>,
    F: Fn(&str),
{
    let path = resolve_asset_path(app_handle, parts);
    match Image::from_path(&path) {
        Ok(image) => Some(image),
        Err(error) => {
            log(&format!(
                "failed to load window icon {}: {error}",
                path.display()
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_root_uses_resource_dir_when_packaged() {
        let root = resources_root(true, Some(PathBuf::from("/opt/ecux/resources")));
        assert_eq!(root, PathBuf::from("/opt/ecux/resources/assets"));
    }

    #[test]
    fn resources_root_uses_manifest_assets_in_development() {
        let root = resources_root(false, Some(PathBuf::from("/opt/ecux/resources")));
        assert_eq!(root, development_assets_dir());
    }

    #[test]
    fn resources_root_falls_back_when_resource_dir_is_unknown() {
        assert_eq!(resources_root(true, None), development_assets_dir());
    }

    #[test]
    fn asset_path_joins_all_parts() {
        let path = asset_path(Path::new("/assets"), &["images", "icon.ico"]);
        assert_eq!(path, PathBuf::from("/assets/images/icon.ico"));
    }

    #[test]
    fn bundled_development_icons_exist() {
        let root = development_assets_dir();
        assert!(asset_path(&root, &[crate::MAIN_WINDOW_ICON]).is_file());
        assert!(asset_path(&root, crate::SPLASH_WINDOW_ICON).is_file());
    }
}
