//! The style library: options-page operations on saved styles and URLs.
//!
//! The options page has no content script behind it, so it edits storage
//! directly. Every operation re-reads the key space first, applies its change,
//! and writes all affected entries in a single `set` so a style and the URL
//! lists that reference it never disagree on disk.

use std::time::Duration;

use thiserror::Error;
use turnstyle_common::url::{UrlError, is_valid_site_url};

use crate::area::{Items, StorageArea, timed};
use crate::error::StorageError;
use crate::schema::{STYLES_KEY, Snapshot, page_value, styles_entry};

/// A library operation that could not be carried out.
///
/// Everything except [`LibraryError::Storage`] is a user-input problem whose
/// `Display` text is meant for the options page.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A URL key failed validation.
    #[error(transparent)]
    Url(#[from] UrlError),
    /// A style needs a name.
    #[error("You should give your style a name")]
    EmptyName,
    /// A style needs rules.
    #[error("You should add some rules")]
    EmptyRules,
    /// Style names are unique.
    #[error("There's already a style called '{0}'")]
    NameTaken(String),
    /// No style with this name is saved.
    #[error("There's no style called '{0}'")]
    UnknownStyle(String),
    /// No association is saved for this URL.
    #[error("Nothing is saved for {0}")]
    UnknownUrl(String),
}

/// One saved style together with the URLs that use it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    /// Unique style name.
    pub name: String,
    /// CSS text.
    pub rules: String,
    /// URL keys whose lists contain this style.
    pub urls: Vec<String>,
}

/// Options-page view of storage.
#[derive(Debug, Clone)]
pub struct Library<S> {
    storage: S,
    limit: Duration,
}

impl<S: StorageArea> Library<S> {
    /// Wrap `storage`, bounding every call by `limit`.
    pub const fn new(storage: S, limit: Duration) -> Self {
        Self { storage, limit }
    }

    /// Read and decode the whole key space.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Storage`] if the read fails.
    pub async fn load(&self) -> Result<Snapshot, LibraryError> {
        let items = timed(self.limit, self.storage.get_all()).await?;
        Ok(Snapshot::from_items(items))
    }

    /// Every saved style with the URLs that use it, by name.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Storage`] if the read fails.
    pub async fn styles(&self) -> Result<Vec<StyleEntry>, LibraryError> {
        let snapshot = self.load().await?;
        Ok(snapshot
            .styles
            .iter()
            .map(|(name, rules)| StyleEntry {
                name: name.clone(),
                rules: rules.clone(),
                urls: snapshot.urls_using(name),
            })
            .collect())
    }

    /// Save a new style. The name must be unused.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or rules or a taken
    /// name, or [`LibraryError::Storage`].
    pub async fn add_style(&self, name: &str, rules: &str) -> Result<(), LibraryError> {
        validate_style(name, rules)?;
        let mut snapshot = self.load().await?;
        if snapshot.styles.contains_key(name) {
            return Err(LibraryError::NameTaken(name.to_string()));
        }
        let _ = snapshot.styles.insert(name.to_string(), rules.to_string());
        self.write(styles_entry(&snapshot.styles)).await
    }

    /// Save `rules` under `name`, creating the style or replacing its rules.
    /// URL associations are left as they are.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or rules, or
    /// [`LibraryError::Storage`].
    pub async fn save_style(&self, name: &str, rules: &str) -> Result<(), LibraryError> {
        validate_style(name, rules)?;
        let mut snapshot = self.load().await?;
        let _ = snapshot.styles.insert(name.to_string(), rules.to_string());
        self.write(styles_entry(&snapshot.styles)).await
    }

    /// Save `rules` under `name` (creating or overwriting the style) and make
    /// sure `url`'s list contains it.
    ///
    /// # Errors
    ///
    /// Returns a validation error, [`LibraryError::UnknownUrl`] if nothing is
    /// saved for `url`, or [`LibraryError::Storage`].
    pub async fn save_url_style(
        &self,
        url: &str,
        name: &str,
        rules: &str,
    ) -> Result<(), LibraryError> {
        validate_style(name, rules)?;
        let mut snapshot = self.load().await?;
        let Some(names) = snapshot.pages.get_mut(url) else {
            return Err(LibraryError::UnknownUrl(url.to_string()));
        };

        let mut entries = Items::new();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
            let _ = entries.insert(url.to_string(), page_value(names));
        }
        let _ = snapshot.styles.insert(name.to_string(), rules.to_string());
        entries.extend(styles_entry(&snapshot.styles));
        self.write(entries).await
    }

    /// Delete a style and every reference to it. Unknown names are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Storage`] if storage fails.
    pub async fn delete_style(&self, name: &str) -> Result<(), LibraryError> {
        let mut snapshot = self.load().await?;
        let mut entries = Items::new();
        for (url, names) in &mut snapshot.pages {
            if names.iter().any(|n| n == name) {
                names.retain(|n| n != name);
                let _ = entries.insert(url.clone(), page_value(names));
            }
        }
        if snapshot.styles.remove(name).is_none() && entries.is_empty() {
            return Ok(());
        }
        entries.extend(styles_entry(&snapshot.styles));
        self.write(entries).await
    }

    /// Rename a style, carrying its rules and URL associations over.
    ///
    /// URLs that used `old` get `new` appended at the end of their list.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::EmptyName`], [`LibraryError::NameTaken`],
    /// [`LibraryError::UnknownStyle`], or [`LibraryError::Storage`].
    pub async fn rename_style(&self, old: &str, new: &str) -> Result<(), LibraryError> {
        if new.trim().is_empty() {
            return Err(LibraryError::EmptyName);
        }
        if old == new {
            return Ok(());
        }
        let mut snapshot = self.load().await?;
        if snapshot.styles.contains_key(new) {
            return Err(LibraryError::NameTaken(new.to_string()));
        }
        let Some(rules) = snapshot.styles.remove(old) else {
            return Err(LibraryError::UnknownStyle(old.to_string()));
        };
        let _ = snapshot.styles.insert(new.to_string(), rules);

        let mut entries = styles_entry(&snapshot.styles);
        for (url, names) in &mut snapshot.pages {
            if names.iter().any(|n| n == old) {
                names.retain(|n| n != old);
                names.push(new.to_string());
                let _ = entries.insert(url.clone(), page_value(names));
            }
        }
        self.write(entries).await
    }

    /// Activate a saved style on `url`, creating the URL entry if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Url`] for an invalid URL,
    /// [`LibraryError::UnknownStyle`], or [`LibraryError::Storage`].
    pub async fn add_url_to_style(&self, url: &str, name: &str) -> Result<(), LibraryError> {
        if !is_valid_site_url(url) {
            return Err(UrlError::Invalid.into());
        }
        let mut snapshot = self.load().await?;
        if !snapshot.styles.contains_key(name) {
            return Err(LibraryError::UnknownStyle(name.to_string()));
        }
        let names = snapshot.pages.entry(url.to_string()).or_default();
        if names.iter().any(|n| n == name) {
            return Ok(());
        }
        names.push(name.to_string());
        self.write(Items::from([(url.to_string(), page_value(names))]))
            .await
    }

    /// Drop `name` from `url`'s list. Missing entries are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Storage`] if storage fails.
    pub async fn remove_style_from_url(&self, url: &str, name: &str) -> Result<(), LibraryError> {
        let mut snapshot = self.load().await?;
        let Some(names) = snapshot.pages.get_mut(url) else {
            return Ok(());
        };
        if !names.iter().any(|n| n == name) {
            return Ok(());
        }
        names.retain(|n| n != name);
        self.write(Items::from([(url.to_string(), page_value(names))]))
            .await
    }

    /// Forget everything saved for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::UnknownUrl`] for the reserved styles key, or
    /// [`LibraryError::Storage`].
    pub async fn delete_url(&self, url: &str) -> Result<(), LibraryError> {
        if url == STYLES_KEY {
            return Err(LibraryError::UnknownUrl(url.to_string()));
        }
        timed(self.limit, self.storage.remove(url)).await?;
        log::info!("deleted URL entry '{url}'");
        Ok(())
    }

    /// Move `old`'s style list to the key `new`, replacing anything there.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Url`] if `new` is invalid,
    /// [`LibraryError::UnknownUrl`] if nothing is saved for `old`, or
    /// [`LibraryError::Storage`].
    pub async fn rename_url(&self, old: &str, new: &str) -> Result<(), LibraryError> {
        if !is_valid_site_url(new) {
            return Err(UrlError::Invalid.into());
        }
        if old == new {
            return Ok(());
        }
        let snapshot = self.load().await?;
        let Some(names) = snapshot.pages.get(old) else {
            return Err(LibraryError::UnknownUrl(old.to_string()));
        };
        self.write(Items::from([(new.to_string(), page_value(names))]))
            .await?;
        timed(self.limit, self.storage.remove(old)).await?;
        log::info!("moved URL entry '{old}' to '{new}'");
        Ok(())
    }

    async fn write(&self, entries: Items) -> Result<(), LibraryError> {
        log::debug!("library write: {:?}", entries.keys().collect::<Vec<_>>());
        timed(self.limit, self.storage.set(entries)).await?;
        Ok(())
    }
}

fn validate_style(name: &str, rules: &str) -> Result<(), LibraryError> {
    if name.trim().is_empty() {
        return Err(LibraryError::EmptyName);
    }
    if rules.trim().is_empty() {
        return Err(LibraryError::EmptyRules);
    }
    Ok(())
}
