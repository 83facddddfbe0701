//! Classification of paths against configured root directories.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::Locations;
use crate::path::normalize;

/// Service that answers whether a path lies under a configured root.
pub trait LocationRegistry {
    /// True iff `path` is one of the roots or lies below one.
    fn check(&self, path: &str) -> bool;

    /// `path` relative to the first containing root (`.` for the root
    /// itself), or `None` if no root contains it.
    fn rel(&self, path: &str) -> Option<String>;
}

/// A list of normalized root directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RootList {
    roots: Vec<String>,
}

impl RootList {
    /// Create a list, normalizing every root.
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            roots: roots
                .into_iter()
                .map(|root| normalize(root.as_ref(), ""))
                .filter(|root| !root.is_empty())
                .collect(),
        }
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl From<Vec<String>> for RootList {
    fn from(roots: Vec<String>) -> Self {
        Self::new(roots)
    }
}

impl From<RootList> for Vec<String> {
    fn from(list: RootList) -> Self {
        list.roots
    }
}

impl LocationRegistry for RootList {
    fn check(&self, path: &str) -> bool {
        self.rel(path).is_some()
    }

    fn rel(&self, path: &str) -> Option<String> {
        let path = normalize(path, "");
        self.roots.iter().find_map(|root| {
            if *root == path {
                return Some(".".to_string());
            }
            let below = if root.ends_with('/') {
                path.strip_prefix(root.as_str())
            } else {
                path.strip_prefix(root.as_str())
                    .and_then(|rest| rest.strip_prefix('/'))
            };
            below.map(str::to_string)
        })
    }
}

/// Which kind of installation an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum UpdateType {
    Core,
    Plugin,
    Theme,
    /// Under the global languages directory.
    Translation,
    #[strum(serialize = "")]
    None,
}

/// Classify a directory path against `locations`.
///
/// The global languages directory wins when the path is the directory
/// itself or sits in its `themes`/`plugins` subdirectories; otherwise theme,
/// plugin and core roots are tried in that order.
pub fn classify(dirpath: &str, locations: &Locations) -> UpdateType {
    if let Some(sub) = locations.global.rel(dirpath) {
        let first = sub.split('/').next().unwrap_or_default();
        if matches!(first, "." | "themes" | "plugins") {
            return UpdateType::Translation;
        }
    }
    if locations.themes.check(dirpath) {
        return UpdateType::Theme;
    }
    if locations.plugins.check(dirpath) {
        return UpdateType::Plugin;
    }
    if locations.core.check(dirpath) {
        return UpdateType::Core;
    }
    UpdateType::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locations() -> Locations {
        Locations {
            global: RootList::new(["/srv/app/content/languages"]),
            themes: RootList::new(["/srv/app/content/themes"]),
            plugins: RootList::new(["/srv/app/content/plugins/"]),
            core: RootList::new(["/srv/app/content", "/srv/app"]),
        }
    }

    #[test]
    fn test_rel_and_check() {
        let list = RootList::new(["/srv/app/", "/opt"]);
        assert_eq!(list.rel("/srv/app"), Some(".".to_string()));
        assert_eq!(list.rel("/srv/app/a/b"), Some("a/b".to_string()));
        assert_eq!(list.rel("/opt/./x"), Some("x".to_string()));
        assert_eq!(list.rel("/srv/application"), None);
        assert!(!list.check("relative/path"));
    }

    #[test]
    fn test_root_of_filesystem() {
        let list = RootList::new(["/"]);
        assert_eq!(list.rel("/etc"), Some("etc".to_string()));
    }

    #[test]
    fn test_classify() {
        let loc = locations();
        assert_eq!(classify("/srv/app/content/languages", &loc), UpdateType::Translation);
        assert_eq!(
            classify("/srv/app/content/languages/plugins", &loc),
            UpdateType::Translation
        );
        assert_eq!(classify("/srv/app/content/languages/other", &loc), UpdateType::Core);
        assert_eq!(classify("/srv/app/content/themes/twenty/lang", &loc), UpdateType::Theme);
        assert_eq!(classify("/srv/app/content/plugins/foo", &loc), UpdateType::Plugin);
        assert_eq!(classify("/srv/app/wp-includes", &loc), UpdateType::Core);
        assert_eq!(classify("/home/elsewhere", &loc), UpdateType::None);
    }

    #[test]
    fn test_update_type_strings() {
        assert_eq!(UpdateType::Translation.to_string(), "translation");
        assert_eq!(UpdateType::None.to_string(), "");
        assert_eq!("plugin".parse::<UpdateType>().unwrap(), UpdateType::Plugin);
    }
}
