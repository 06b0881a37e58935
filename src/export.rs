use std::io::Cursor;
use std::path::PathBuf;

use egui::Color32;
use image::{ImageFormat, RgbaImage};

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::raster::RasterSurface;
use crate::renderer::paint_shapes;
use crate::shape::Shape;

/// The image is PNG, but it is offered as a plain binary stream so the
/// browser saves it instead of opening it inline.
pub const DOWNLOAD_MIME: &str = "application/octet-stream";
pub const IMAGE_MIME: &str = "image/png";

/// A rendered canvas ready to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Paint `shapes` onto a `[width, height]` device-pixel buffer filled with
/// `background`, the same color the on-screen canvas clears to.
pub fn rasterize(shapes: &[Shape], [width, height]: [u32; 2], background: Color32) -> RgbaImage {
    let mut surface = RasterSurface::with_background(width, height, background);
    paint_shapes(&mut surface, shapes);
    surface.into_image()
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Rasterize the canvas and encode it for download.
pub fn export_png(
    shapes: &[Shape],
    size: [u32; 2],
    background: Color32,
    file_name: &str,
) -> Result<ExportArtifact, ExportError> {
    let [width, height] = size;
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCanvas { width, height });
    }
    let bytes = encode_png(&rasterize(shapes, size, background))?;
    log::debug!("Exported {}x{} canvas as {} ({} bytes)", width, height, IMAGE_MIME, bytes.len());
    Ok(ExportArtifact {
        file_name: file_name.to_owned(),
        mime: DOWNLOAD_MIME,
        bytes,
        width,
        height,
    })
}

/// Hand the artifact to the user: a file in the export directory natively,
/// a browser download on the web.
///
/// Returns where the file went (the path, or the file name on the web).
pub fn offer_download(artifact: &ExportArtifact, config: &ExportConfig) -> Result<PathBuf, ExportError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::fs::create_dir_all(&config.directory)?;
        let path = config.directory.join(&artifact.file_name);
        std::fs::write(&path, &artifact.bytes)?;
        log::info!("Saved {} ({} bytes)", path.display(), artifact.bytes.len());
        Ok(path)
    }

    #[cfg(target_arch = "wasm32")]
    {
        let _ = config;
        web::download(artifact)?;
        log::info!("Offered {} for download", artifact.file_name);
        Ok(PathBuf::from(&artifact.file_name))
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use eframe::wasm_bindgen::{JsCast as _, JsValue};

    use super::ExportArtifact;
    use crate::error::ExportError;

    fn js_err(err: JsValue) -> ExportError {
        ExportError::Web(format!("{err:?}"))
    }

    pub fn download(artifact: &ExportArtifact) -> Result<(), ExportError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ExportError::Web("no document".to_owned()))?;

        let bytes = js_sys::Uint8Array::from(artifact.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(artifact.mime);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| ExportError::Web("not an anchor element".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(&artifact.file_name);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).map_err(js_err)
    }
}
