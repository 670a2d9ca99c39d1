//! Chart snapshot export.
//!
//! Desktop rasterizes the snapshot SVG to PNG (usvg/resvg) and writes it
//! under the app data dir; the web build hands the SVG to the browser as a
//! download.

use dioxus::prelude::*;
use thiserror::Error;

use crate::chart::svg::{snapshot_document, SnapshotText};
use crate::chart::ChartLayout;
use crate::core::ChartConfig;
use crate::data::{Component, GroupKind};
use crate::t;

use super::labels::{component_label, group_label, heading_text, use_chart_config};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("couldn't parse snapshot: {0}")]
    Render(String),
    #[error("snapshot has no drawable area")]
    Raster,
    #[error("couldn't encode PNG: {0}")]
    Encode(String),
    #[error("couldn't write snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("no export directory available")]
    NoExportDir,
    #[error("browser refused the download: {0}")]
    Browser(&'static str),
}

/// Where a finished snapshot ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Saved(String),
    Downloaded,
}

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Done(String),
    Error(String),
}

pub fn snapshot_text(layout: &ChartLayout) -> SnapshotText {
    SnapshotText {
        heading: heading_text(&layout.title),
        group_labels: GroupKind::ALL.map(group_label),
        component_labels: Component::ALL.map(component_label),
        log_note: t!("dashboard-scale-log"),
    }
}

/// `stageboard-os-doors-20251019_101500`
pub fn snapshot_stem(title: &str) -> String {
    let mut slug = String::new();
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        format!("stageboard-{}", timestamp_slug())
    } else {
        format!("stageboard-{slug}-{}", timestamp_slug())
    }
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "snapshot".into())
}

pub fn export_snapshot(layout: &ChartLayout, config: &ChartConfig) -> Result<Delivery, ExportError> {
    let svg = snapshot_document(layout, config, &snapshot_text(layout));
    deliver(&svg, &snapshot_stem(&layout.title))
}

#[cfg(not(target_arch = "wasm32"))]
fn deliver(svg: &str, stem: &str) -> Result<Delivery, ExportError> {
    let png = rasterize(svg)?;
    let dir = export_dir()?;
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{stem}.png"));
    std::fs::write(&path, png)?;
    tracing::info!(path = %path.display(), "snapshot saved");
    Ok(Delivery::Saved(path.to_string_lossy().to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "Stageboard", "Stageboard")
        .ok_or(ExportError::NoExportDir)?;
    Ok(dirs.data_dir().join("exports"))
}

/// Renders an SVG document to PNG bytes at its intrinsic size.
#[cfg(not(target_arch = "wasm32"))]
pub fn rasterize(svg: &str) -> Result<Vec<u8>, ExportError> {
    let mut options = usvg::Options::default();
    std::sync::Arc::make_mut(&mut options.fontdb).load_system_fonts();

    let tree =
        usvg::Tree::from_str(svg, &options).map_err(|err| ExportError::Render(err.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap =
        tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(ExportError::Raster)?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|err| ExportError::Encode(err.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn deliver(svg: &str, stem: &str) -> Result<Delivery, ExportError> {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(svg));

    let mut opts = BlobPropertyBag::new();
    opts.type_("image/svg+xml");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| ExportError::Browser("blob"))?;
    let url = Url::create_object_url_with_blob(&blob).map_err(|_| ExportError::Browser("url"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ExportError::Browser("document"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| ExportError::Browser("anchor"))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(&format!("{stem}.svg"));
    anchor.style().set_property("display", "none").ok();

    document
        .body()
        .ok_or(ExportError::Browser("body"))?
        .append_child(&anchor)
        .ok();
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url).ok();

    Ok(Delivery::Downloaded)
}

#[component]
pub fn SnapshotExport(layout: ChartLayout) -> Element {
    let config = use_chart_config();
    let mut status = use_signal(|| ExportStatus::Idle);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Done(message) => Some(("export__status export__status--success", message.clone())),
        ExportStatus::Error(message) => Some(("export__status export__status--error", message.clone())),
    };

    let on_export = move |_| {
        let next = match export_snapshot(&layout, &config) {
            Ok(Delivery::Saved(path)) => ExportStatus::Done(t!("export-done-file", path = path.as_str())),
            Ok(Delivery::Downloaded) => ExportStatus::Done(t!("export-done-download")),
            Err(err) => {
                tracing::warn!("snapshot export failed: {err}");
                ExportStatus::Error(t!("export-failed", message = err.to_string()))
            }
        };
        status.set(next);
    };

    rsx! {
        div { class: "export",
            button {
                r#type: "button",
                class: "button button--secondary",
                onclick: on_export,
                {t!("export-button")}
            }
            if let Some((class, message)) = feedback {
                p { class: "{class}", "{message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_slugifies_title() {
        let stem = snapshot_stem("W$ POS (nightly)");
        assert!(stem.starts_with("stageboard-w-pos-nightly-"), "{stem}");
    }

    #[test]
    fn stem_without_title_still_unique_by_time() {
        let stem = snapshot_stem("  ");
        assert!(stem.starts_with("stageboard-"));
        assert!(stem.chars().any(|c| c.is_ascii_digit()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn rasterize_produces_png() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="#FF0000"/></svg>"##;
        let png = rasterize(svg).expect("png");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn rasterize_rejects_garbage() {
        assert!(matches!(rasterize("not svg"), Err(ExportError::Render(_))));
    }
}
