//! Browser capability bridge for the `explorer_host_web` adapters.
//!
//! This module contains the WASM/JS interop layer and a non-WASM fallback shim for dialogs,
//! navigation, clipboard, downloads, toasts and file reading.

use explorer_host::{FileUpload, NoticeLevel};

#[cfg(target_arch = "wasm32")]
mod imp {
    use super::*;
    use js_sys::{Promise, Uint8Array};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    #[wasm_bindgen(inline_js = r#"
const TOAST_VISIBLE_MS = 2500;
const TOAST_EXIT_MS = 300;

function ensureToastStyles() {
  if (document.getElementById('explorer-toast-styles')) return;
  const style = document.createElement('style');
  style.id = 'explorer-toast-styles';
  style.textContent = `
@keyframes explorerToastIn { from { transform: translateX(100%); opacity: 0; } to { transform: translateX(0); opacity: 1; } }
@keyframes explorerToastOut { from { transform: translateX(0); opacity: 1; } to { transform: translateX(100%); opacity: 0; } }
.explorer-toast { position: fixed; bottom: 2rem; right: 2rem; z-index: 9999; padding: 1rem 1.5rem;
  border-radius: .75rem; border: 1px solid var(--border); background: var(--card);
  box-shadow: var(--shadow-xl); animation: explorerToastIn .3s ease-out; }
.explorer-toast[data-level="error"] { border-color: var(--destructive, #dc2626); }
.explorer-toast-title { font-weight: 600; }
.explorer-toast-body { font-size: .875rem; color: var(--muted-foreground); }`;
  document.head.appendChild(style);
}

export function jsShowToast(level, title, body) {
  ensureToastStyles();
  const toast = document.createElement('div');
  toast.className = 'explorer-toast';
  toast.dataset.level = level;
  const heading = document.createElement('div');
  heading.className = 'explorer-toast-title';
  heading.textContent = title;
  const detail = document.createElement('div');
  detail.className = 'explorer-toast-body';
  detail.textContent = body;
  toast.appendChild(heading);
  toast.appendChild(detail);
  document.body.appendChild(toast);
  setTimeout(() => {
    toast.style.animation = 'explorerToastOut .3s ease-in';
    setTimeout(() => toast.remove(), TOAST_EXIT_MS);
  }, TOAST_VISIBLE_MS);
}

export async function jsCopyText(text) {
  if (!navigator.clipboard || !navigator.clipboard.writeText) {
    throw new Error('Clipboard API is unavailable in this browser context');
  }
  await navigator.clipboard.writeText(text);
  return null;
}

export function jsSaveTextFile(filename, mimeType, contents) {
  const blob = new Blob([contents], { type: mimeType });
  const url = URL.createObjectURL(blob);
  const anchor = document.createElement('a');
  anchor.href = url;
  anchor.download = filename;
  document.body.appendChild(anchor);
  anchor.click();
  document.body.removeChild(anchor);
  URL.revokeObjectURL(url);
}
"#)]
    extern "C" {
        #[wasm_bindgen(js_name = jsShowToast)]
        fn js_show_toast(level: &str, title: &str, body: &str);
        #[wasm_bindgen(js_name = jsCopyText)]
        fn js_copy_text(text: &str) -> Promise;
        #[wasm_bindgen(js_name = jsSaveTextFile, catch)]
        fn js_save_text_file(filename: &str, mime_type: &str, contents: &str)
            -> Result<(), JsValue>;
    }

    fn window() -> Result<web_sys::Window, String> {
        web_sys::window().ok_or_else(|| "window is unavailable".to_string())
    }

    fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    async fn await_promise(promise: Promise) -> Result<JsValue, String> {
        JsFuture::from(promise).await.map_err(js_error_to_string)
    }

    pub fn open_url(url: &str) -> Result<(), String> {
        window()?
            .open_with_url_and_target(url, "_blank")
            .map(|_| ())
            .map_err(js_error_to_string)
    }

    pub fn navigate(url: &str) -> Result<(), String> {
        window()?.location().set_href(url).map_err(js_error_to_string)
    }

    pub fn confirm(message: &str) -> bool {
        window()
            .and_then(|w| w.confirm_with_message(message).map_err(js_error_to_string))
            .unwrap_or(false)
    }

    pub fn alert(message: &str) {
        if let Ok(window) = window() {
            let _ = window.alert_with_message(message);
        }
    }

    pub fn show_toast(level: NoticeLevel, title: &str, body: &str) {
        let level = match level {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        };
        js_show_toast(level, title, body);
    }

    pub async fn copy_text(text: &str) -> Result<(), String> {
        let _ = await_promise(js_copy_text(text)).await?;
        Ok(())
    }

    pub fn save_text_file(filename: &str, mime_type: &str, contents: &str) -> Result<(), String> {
        js_save_text_file(filename, mime_type, contents).map_err(js_error_to_string)
    }

    pub async fn read_file_upload(file: &web_sys::File) -> Result<FileUpload, String> {
        let buffer = await_promise(file.array_buffer()).await?;
        let content_type = file.type_();
        Ok(FileUpload {
            file_name: file.name(),
            content_type: (!content_type.is_empty()).then_some(content_type),
            bytes: Uint8Array::new(&buffer).to_vec(),
        })
    }

    pub async fn read_file_text(file: &web_sys::File) -> Result<String, String> {
        await_promise(file.text())
            .await?
            .as_string()
            .ok_or_else(|| "file did not decode as text".to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use super::*;

    fn unsupported() -> String {
        "Browser APIs are only available when compiled for wasm32".to_string()
    }

    pub fn open_url(_url: &str) -> Result<(), String> {
        Err(unsupported())
    }

    pub fn navigate(_url: &str) -> Result<(), String> {
        Err(unsupported())
    }

    pub fn confirm(_message: &str) -> bool {
        false
    }

    pub fn alert(_message: &str) {}

    pub fn show_toast(_level: NoticeLevel, _title: &str, _body: &str) {}

    pub async fn copy_text(_text: &str) -> Result<(), String> {
        Err(unsupported())
    }

    pub fn save_text_file(_filename: &str, _mime_type: &str, _contents: &str) -> Result<(), String> {
        Err(unsupported())
    }

    pub async fn read_file_upload(_file: &web_sys::File) -> Result<FileUpload, String> {
        Err(unsupported())
    }

    pub async fn read_file_text(_file: &web_sys::File) -> Result<String, String> {
        Err(unsupported())
    }
}

pub fn open_url(url: &str) -> Result<(), String> {
    imp::open_url(url)
}

pub fn navigate(url: &str) -> Result<(), String> {
    imp::navigate(url)
}

pub fn confirm(message: &str) -> bool {
    imp::confirm(message)
}

pub fn alert(message: &str) {
    imp::alert(message)
}

pub fn show_toast(level: NoticeLevel, title: &str, body: &str) {
    imp::show_toast(level, title, body)
}

pub async fn copy_text(text: &str) -> Result<(), String> {
    imp::copy_text(text).await
}

pub fn save_text_file(filename: &str, mime_type: &str, contents: &str) -> Result<(), String> {
    imp::save_text_file(filename, mime_type, contents)
}

pub async fn read_file_upload(file: &web_sys::File) -> Result<FileUpload, String> {
    imp::read_file_upload(file).await
}

pub async fn read_file_text(file: &web_sys::File) -> Result<String, String> {
    imp::read_file_text(file).await
}
