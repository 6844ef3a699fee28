//! DOM layer for preview media.
//!
//! A fixed-position container above the canvas holds at most one `<video>`
//! or `<iframe>`. It never takes pointer events, so the canvas underneath
//! keeps receiving moves.

use rowscroll_core::MediaElement;
use rowscroll_widgets::MediaSurface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlIFrameElement, HtmlVideoElement};

use super::layer::{surface_style, MediaOp};

/// Owner of the preview container element.
pub struct MediaLayer {
    document: Document,
    container: HtmlElement,
}

impl MediaLayer {
    /// Create the container and append it to `<body>`.
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let container = document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(JsValue::from)?;
        container.set_attribute("data-testid", "hover-preview")?;
        container.set_attribute("aria-hidden", "true")?;
        container.style().set_css_text(&surface_style(None));

        document
            .body()
            .ok_or_else(|| JsValue::from_str("No body"))?
            .append_child(&container)?;

        Ok(Self {
            document: document.clone(),
            container,
        })
    }

    /// Position the container and apply `op` to its media element.
    pub fn apply(&self, surface: Option<&MediaSurface>, op: &MediaOp) -> Result<(), JsValue> {
        self.container.style().set_css_text(&surface_style(surface));

        match op {
            MediaOp::Keep => {}
            MediaOp::Clear => self.container.set_inner_html(""),
            MediaOp::Mount(element) => {
                self.container.set_inner_html("");
                let node = self.create(element)?;
                self.container.append_child(&node)?;
            }
            MediaOp::SetMuted(muted) => {
                if let Some(video) = self
                    .container
                    .first_element_child()
                    .and_then(|e| e.dyn_into::<HtmlVideoElement>().ok())
                {
                    video.set_muted(*muted);
                }
            }
        }
        Ok(())
    }

    /// Remove the container from the document.
    pub fn detach(&self) {
        self.container.remove();
    }

    fn create(&self, element: &MediaElement) -> Result<Element, JsValue> {
        match element {
            MediaElement::Video { src, muted } => {
                let video = self
                    .document
                    .create_element("video")?
                    .dyn_into::<HtmlVideoElement>()
                    .map_err(JsValue::from)?;
                video.set_src(src);
                video.set_autoplay(true);
                video.set_loop(true);
                video.set_muted(*muted);
                video.set_preload("auto");
                video.set_attribute("playsinline", "")?;
                video
                    .style()
                    .set_css_text("width:100%;height:100%;object-fit:cover;background:#000");
                Ok(video.into())
            }
            MediaElement::Frame { src, title, key } => {
                let frame = self
                    .document
                    .create_element("iframe")?
                    .dyn_into::<HtmlIFrameElement>()
                    .map_err(JsValue::from)?;
                frame.set_src(src);
                frame.set_title(title);
                frame.set_attribute("allow", "autoplay; encrypted-media")?;
                frame.set_attribute("frameborder", "0")?;
                frame.set_attribute("data-key", key)?;
                frame
                    .style()
                    .set_css_text("width:100%;height:100%;border:0;background:#000");
                Ok(frame.into())
            }
        }
    }
}

impl Drop for MediaLayer {
    fn drop(&mut self) {
        self.detach();
    }
}
