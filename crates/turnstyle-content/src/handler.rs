//! Request dispatch.
//!
//! Each request runs to completion before its response is produced; a
//! response that reports success means storage has acknowledged every write
//! the request made.

use turnstyle_storage::StorageArea;

use crate::content_script::ContentScript;
use crate::error::ContentError;
use crate::message::{PageSettingsResponse, Request, Response};

const EMPTY_NAME: &str = "You should give your style a name";
const EMPTY_RULES: &str = "You should add some rules";

fn validate_style(name: &str, rules: &str) -> Result<(), ContentError> {
    if name.trim().is_empty() {
        return Err(ContentError::Validation(EMPTY_NAME));
    }
    if rules.trim().is_empty() {
        return Err(ContentError::Validation(EMPTY_RULES));
    }
    Ok(())
}

impl<S: StorageArea> ContentScript<S> {
    /// Carry out one request.
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying operation produced. See
    /// [`respond`](Self::respond) for the error-to-response mapping.
    pub async fn handle(&mut self, request: Request) -> Result<Response, ContentError> {
        log::debug!("handling '{}'", request.instruction());
        match request {
            Request::GetPageSettings => Ok(Response::PageSettings(PageSettingsResponse::from(
                self.settings(),
            ))),
            Request::InsertStyle {
                style_rules,
                style_id,
                class_name,
            } => {
                let class_name = if style_id == self.config.preview_id {
                    let _ = self.applicator.remove(&mut self.dom, Some(&style_id), None);
                    Some(class_name.unwrap_or_else(|| self.config.preview_class.clone()))
                } else {
                    class_name
                };
                let inserted = self.applicator.insert(
                    &mut self.dom,
                    &style_rules,
                    Some(&style_id),
                    class_name.as_deref(),
                );
                Ok(Response::message(if inserted.is_some() {
                    "style inserted"
                } else {
                    "nothing to insert"
                }))
            }
            Request::RemoveStyle {
                style_id,
                class_name,
                style_name,
                delete,
            } => {
                if delete {
                    let name = style_name.ok_or(ContentError::MissingField("styleName"))?;
                    self.unset_page_style(&name).await?;
                }
                let removed =
                    self.applicator
                        .remove(&mut self.dom, style_id.as_deref(), class_name.as_deref());
                log::debug!("removed {removed} style node(s)");
                Ok(Response::message("style removed"))
            }
            Request::SaveStyle {
                style_name,
                style_rules,
            } => {
                validate_style(&style_name, &style_rules)?;
                self.add_style(&style_name, &style_rules).await?;
                Ok(Response::message("style saved"))
            }
            Request::EditStyle {
                style_name,
                style_rules,
            } => {
                validate_style(&style_name, &style_rules)?;
                self.edit_style(&style_name, &style_rules).await?;
                Ok(Response::message("style updated"))
            }
            Request::ChangeUrl { url } => {
                self.change_active_url(&url).await?;
                Ok(Response::message("URL saved"))
            }
            Request::ClearSettings => {
                self.clear_storage(false).await?;
                Ok(Response::message("settings cleared"))
            }
            Request::ClearAll => {
                self.clear_storage(true).await?;
                Ok(Response::message("storage cleared"))
            }
        }
    }

    /// Carry out one request, reporting failures as an error response.
    pub async fn respond(&mut self, request: Request) -> Response {
        let instruction = request.instruction();
        match self.handle(request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("'{instruction}' failed: {e}");
                Response::error(e)
            }
        }
    }

    /// Decode a JSON request, carry it out and encode the response.
    ///
    /// This never fails: malformed requests get an error response too.
    pub async fn handle_json(&mut self, json: &str) -> String {
        let response = match serde_json::from_str::<Request>(json) {
            Ok(request) => self.respond(request).await,
            Err(e) => {
                let e = ContentError::InvalidRequest(e);
                log::warn!("{e}");
                Response::error(e)
            }
        };
        serde_json::to_string(&response)
            .unwrap_or_else(|e| format!(r#"{{"error":"unencodable response: {e}"}}"#))
    }
}
