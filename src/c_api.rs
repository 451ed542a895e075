// C ABI for embedding the engine in a non-Rust host. Results cross the
// boundary as JSON strings owned by Rust; release them with
// `glyph_free_string`.
use crate::core::engine::GlyphEngine;
use libc::c_char;
use serde::Serialize;
use std::ffi::{CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::ptr;
use std::sync::OnceLock;

static GLYPH_ENGINE: OnceLock<GlyphEngine> = OnceLock::new();

/// Empty string for null or non-UTF-8 input.
unsafe fn str_arg<'a>(ptr: *const c_char) -> &'a str {
    if ptr.is_null() {
        return "";
    }
    CStr::from_ptr(ptr).to_str().unwrap_or("")
}

fn to_c_json<T: Serialize>(value: &T) -> *mut c_char {
    let json = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    // serde_json escapes NUL, so this only fails on a bug.
    match CString::new(json) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Run `f` against the engine, returning null if it is not initialized or
/// if `f` panics.
fn with_engine(f: impl FnOnce(&GlyphEngine) -> *mut c_char) -> *mut c_char {
    let Some(engine) = GLYPH_ENGINE.get() else {
        tracing::warn!("glyph engine used before glyph_engine_init");
        return ptr::null_mut();
    };
    catch_unwind(AssertUnwindSafe(|| f(engine))).unwrap_or_else(|_| {
        tracing::error!("panic inside glyph engine call");
        ptr::null_mut()
    })
}

/// Builds the engine from the dictionary at `dictionary_path`. A dictionary
/// that cannot be loaded yields an empty engine. Returns false only if the
/// engine was already initialized or initialization panicked.
///
/// # Safety
/// `dictionary_path` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn glyph_engine_init(dictionary_path: *const c_char) -> bool {
    let path = str_arg(dictionary_path);
    let result = catch_unwind(|| {
        let engine = GlyphEngine::from_file_or_empty(Path::new(path));
        GLYPH_ENGINE.set(engine).is_ok()
    });
    match result {
        Ok(true) => {
            tracing::info!(path, "glyph engine initialized");
            true
        }
        Ok(false) => false,
        Err(_) => {
            tracing::error!("panic during glyph engine initialization");
            false
        }
    }
}

/// # Safety
/// `text` and `lang` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn glyph_text_to_glyph(text: *const c_char, lang: *const c_char) -> *mut c_char {
    let (text, lang) = (str_arg(text), str_arg(lang));
    with_engine(|engine| to_c_json(&engine.text_to_glyph(text, lang)))
}

/// # Safety
/// `glyphs` and `lang` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn glyph_glyph_to_text(glyphs: *const c_char, lang: *const c_char) -> *mut c_char {
    let (glyphs, lang) = (str_arg(glyphs), str_arg(lang));
    with_engine(|engine| to_c_json(&engine.glyph_to_text(glyphs, lang)))
}

/// JSON `null` when nothing matches.
///
/// # Safety
/// `glyphs` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn glyph_match_canonical(glyphs: *const c_char) -> *mut c_char {
    let glyphs = str_arg(glyphs);
    with_engine(|engine| to_c_json(&engine.match_canonical(glyphs)))
}

#[no_mangle]
pub extern "C" fn glyph_palette() -> *mut c_char {
    with_engine(|engine| {
        let palette: serde_json::Map<String, serde_json::Value> = engine
            .glyph_palette()
            .into_iter()
            .map(|c| (c.name, serde_json::Value::from(c.glyphs)))
            .collect();
        to_c_json(&palette)
    })
}

/// # Safety
/// `s` must be null or a pointer returned by one of the functions above,
/// not yet freed.
#[no_mangle]
pub unsafe extern "C" fn glyph_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn take(ptr: *mut c_char) -> serde_json::Value {
        assert!(!ptr.is_null());
        let json = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        unsafe { glyph_free_string(ptr) };
        serde_json::from_str(&json).unwrap()
    }

    // The engine is process-wide, so the whole lifecycle lives in one test.
    #[test]
    fn test_ffi_lifecycle() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            serde_json::json!({
                "categories": { "core": { "🧠": { "en": "think", "zh": "思考", "keywords": ["think"] } } },
                "sequences": { "canonical": [ { "sequence": "🧠🧠", "en": "deep thought" } ] }
            })
        )
        .unwrap();

        assert!(with_engine(|_| ptr::null_mut()).is_null());

        let path = CString::new(file.path().to_str().unwrap()).unwrap();
        assert!(unsafe { glyph_engine_init(path.as_ptr()) });
        assert!(!unsafe { glyph_engine_init(path.as_ptr()) });

        let text = CString::new("think").unwrap();
        let lang = CString::new("zh").unwrap();
        let forward = take(unsafe { glyph_text_to_glyph(text.as_ptr(), lang.as_ptr()) });
        assert_eq!(forward["glyphs"], "🧠");
        assert_eq!(forward["gloss"][0], "思考");
        assert_eq!(forward["matchCount"], 1);

        let glyphs = CString::new("🧠").unwrap();
        let reverse = take(unsafe { glyph_glyph_to_text(glyphs.as_ptr(), ptr::null()) });
        assert_eq!(reverse["text"], "think");

        let canonical = take(unsafe { glyph_match_canonical(glyphs.as_ptr()) });
        assert_eq!(canonical["partial"], true);
        assert_eq!(canonical["en"], "deep thought");

        let palette = take(glyph_palette());
        assert_eq!(palette["core"][0], "🧠");
    }
}
