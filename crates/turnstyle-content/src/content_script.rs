//! The per-page content script.
//!
//! One [`ContentScript`] owns everything turnStyle knows about a page: its
//! document, the storage handle, the resolved settings and the applicator.
//! It is created once when the page loads (which applies the saved styles)
//! and then serves popup requests until the page goes away.

use std::time::Duration;

use turnstyle_common::url::{check_active_url, page_origin};
use turnstyle_dom::DomTree;
use turnstyle_storage::schema::{decode_styles, is_page_key, page_entry, styles_entry};
use turnstyle_storage::{STYLES_KEY, Snapshot, StorageArea, StyleMap, timed};

use crate::applicator::{StyleApplicator, style_id};
use crate::config::ContentConfig;
use crate::error::ContentError;
use crate::resolver::PageSettings;

/// turnStyle's state for one loaded page.
#[derive(Debug)]
pub struct ContentScript<S: StorageArea> {
    pub(crate) dom: DomTree,
    storage: S,
    pub(crate) config: ContentConfig,
    pub(crate) applicator: StyleApplicator,
    settings: PageSettings,
}

impl<S: StorageArea> ContentScript<S> {
    /// Attach to a freshly loaded page and apply its saved styles.
    ///
    /// # Errors
    ///
    /// Fails if `full_url` has no usable origin, or if reading storage fails
    /// or times out. Nothing is inserted in either case.
    pub async fn load(
        full_url: &str,
        dom: DomTree,
        storage: S,
        config: ContentConfig,
    ) -> Result<Self, ContentError> {
        let origin = page_origin(full_url)?;
        let applicator = StyleApplicator::new(&config.marker_class);
        let mut script = Self {
            dom,
            storage,
            config,
            applicator,
            settings: PageSettings::empty(&origin, full_url),
        };
        script.apply_saved().await?;
        Ok(script)
    }

    /// STEP 1: Read the whole key space.
    /// STEP 2: Resolve the active URL and its style list.
    /// STEP 3: Insert each listed style that has saved rules, in list order.
    async fn apply_saved(&mut self) -> Result<(), ContentError> {
        // STEP 1
        let items = timed(self.timeout(), self.storage.get_all()).await?;

        // STEP 2
        self.settings = PageSettings::resolve(
            &self.settings.origin,
            &self.settings.full_url,
            Snapshot::from_items(items),
        );
        log::info!(
            "resolved {} to '{}' with {} style(s)",
            self.settings.full_url,
            self.settings.active_url,
            self.settings.page_styles.len()
        );

        // STEP 3
        for (name, rules) in self.settings.resolvable_styles() {
            let _ = self
                .applicator
                .insert(&mut self.dom, rules, Some(&style_id(name)), None);
        }
        Ok(())
    }

    /// The page's document.
    #[must_use]
    pub const fn dom(&self) -> &DomTree {
        &self.dom
    }

    /// The page's resolved settings.
    #[must_use]
    pub const fn settings(&self) -> &PageSettings {
        &self.settings
    }

    fn timeout(&self) -> Duration {
        self.config.storage_timeout()
    }

    async fn read_styles(&self) -> Result<StyleMap, ContentError> {
        let mut items = timed(self.timeout(), self.storage.get(&[STYLES_KEY])).await?;
        Ok(items
            .remove(STYLES_KEY)
            .and_then(decode_styles)
            .unwrap_or_default())
    }

    /// Save `rules` under `name`.
    ///
    /// An existing style is only replaced when `overwrite` is set. Returns
    /// whether anything was written.
    ///
    /// # Errors
    ///
    /// Returns the storage error if reading or writing fails.
    pub async fn save_style(
        &mut self,
        name: &str,
        rules: &str,
        overwrite: bool,
    ) -> Result<bool, ContentError> {
        let mut styles = self.read_styles().await?;
        let written = overwrite || !styles.contains_key(name);
        if written {
            let _ = styles.insert(name.to_string(), rules.to_string());
            timed(self.timeout(), self.storage.set(styles_entry(&styles))).await?;
            log::debug!("saved style '{name}' (overwrite: {overwrite})");
        }
        self.settings.styles = styles;
        Ok(written)
    }

    /// Add `name` to the end of the active page's style list.
    ///
    /// A name already in the list is not added again.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::ReservedKey`] if the active URL is the styles
    /// key, or the storage error if the write fails.
    pub async fn set_page_style(&mut self, name: &str) -> Result<(), ContentError> {
        let url = self.writable_active_url()?;
        let mut names = self.settings.page_styles.clone();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        timed(self.timeout(), self.storage.set(page_entry(&url, &names))).await?;
        self.settings.page_styles = names;
        self.settings.matched = true;
        Ok(())
    }

    /// Drop `name` from the active page's style list.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::ReservedKey`] if the active URL is the styles
    /// key, or the storage error if the write fails.
    pub async fn unset_page_style(&mut self, name: &str) -> Result<(), ContentError> {
        let url = self.writable_active_url()?;
        let mut names = self.settings.page_styles.clone();
        names.retain(|n| n != name);
        timed(self.timeout(), self.storage.set(page_entry(&url, &names))).await?;
        self.settings.page_styles = names;
        Ok(())
    }

    fn writable_active_url(&self) -> Result<String, ContentError> {
        let url = &self.settings.active_url;
        if is_page_key(url) {
            Ok(url.clone())
        } else {
            Err(ContentError::ReservedKey(url.clone()))
        }
    }

    /// Forget saved settings and strip every applied style from the page.
    ///
    /// With `clear_all`, every key in storage is removed; otherwise only the
    /// active page's association.
    ///
    /// # Errors
    ///
    /// Returns the storage error if a read or remove fails. Styles are only
    /// removed from the page once storage has been cleared.
    pub async fn clear_storage(&mut self, clear_all: bool) -> Result<(), ContentError> {
        if clear_all {
            let items = timed(self.timeout(), self.storage.get_all()).await?;
            for key in items.keys() {
                timed(self.timeout(), self.storage.remove(key)).await?;
            }
            self.settings.styles.clear();
            log::info!("cleared {} key(s)", items.len());
        } else {
            let url = self.writable_active_url()?;
            timed(self.timeout(), self.storage.remove(&url)).await?;
            log::info!("cleared settings for '{url}'");
        }
        self.settings.page_styles.clear();

        let removed = self.applicator.remove(&mut self.dom, None, None);
        log::debug!("removed {removed} style node(s)");
        Ok(())
    }

    /// Replace the rules of an applied style, on the page and in storage.
    ///
    /// The style's node is re-inserted, so it ends up last among the applied
    /// styles.
    ///
    /// # Errors
    ///
    /// Returns the storage error if saving fails. The page has already been
    /// updated at that point.
    pub async fn edit_style(&mut self, name: &str, rules: &str) -> Result<(), ContentError> {
        let id = style_id(name);
        let _ = self.applicator.remove(&mut self.dom, Some(&id), None);
        let _ = self.applicator.insert(&mut self.dom, rules, Some(&id), None);
        let _ = self.save_style(name, rules, true).await?;
        Ok(())
    }

    /// Apply a style and save it, together with the page association.
    ///
    /// A style that already exists keeps its saved rules, and those are what
    /// gets applied.
    ///
    /// # Errors
    ///
    /// Returns the storage error if any write fails.
    pub async fn add_style(&mut self, name: &str, rules: &str) -> Result<(), ContentError> {
        let _ = self.save_style(name, rules, false).await?;
        self.set_page_style(name).await?;

        let id = style_id(name);
        let saved = self
            .settings
            .styles
            .get(name)
            .map_or(rules, String::as_str);
        let _ = self.applicator.remove(&mut self.dom, Some(&id), None);
        let _ = self.applicator.insert(&mut self.dom, saved, Some(&id), None);
        Ok(())
    }

    /// Move the page's style list to a different URL key and make it active.
    ///
    /// The key must be a prefix of the page URL that stays within the page
    /// origin. The old key is left in place, and any list already stored
    /// under the new key is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Url`] if the key is rejected, or the storage
    /// error if the write fails.
    pub async fn change_active_url(&mut self, url: &str) -> Result<(), ContentError> {
        check_active_url(url, &self.settings.full_url, &self.settings.origin)?;
        let entry = page_entry(url, &self.settings.page_styles);
        timed(self.timeout(), self.storage.set(entry)).await?;
        log::info!(
            "active URL changed from '{}' to '{url}'",
            self.settings.active_url
        );

        self.settings.active_url = url.to_string();
        self.settings.matched = true;
        Ok(())
    }
}
