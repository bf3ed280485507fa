//! Some FMUs are exported against an embedded Python interpreter and resolve
//! its symbols lazily when their binary is loaded. Preloading the interpreter
//! library with global symbol visibility lets those FMUs load on hosts where
//! libpython is present but not a declared dependency of the FMU binary.

#[cfg(target_os = "linux")]
const CANDIDATES: &[&str] = &[
    "libpython3.12.so.1.0",
    "libpython3.12.so",
    "libpython3.11.so.1.0",
    "libpython3.11.so",
    "libpython3.10.so.1.0",
    "libpython3.10.so",
];

/// Environment variable naming a specific interpreter library to preload.
pub const LIBPYTHON_HINT_VAR: &str = "CADS_LIBPYTHON_HINT";

/// Preload a Python interpreter library, once per process. Failure to find
/// any candidate is non-fatal; the FMU may still load on its own.
pub(crate) fn libpython_hint() {
    static PRELOAD: std::sync::Once = std::sync::Once::new();
    PRELOAD.call_once(|| {
        #[cfg(target_os = "linux")]
        {
            if let Ok(hint) = std::env::var(LIBPYTHON_HINT_VAR) {
                if try_load(&hint) {
                    return;
                }
            }
            for candidate in CANDIDATES {
                if try_load(candidate) {
                    return;
                }
            }
            log::debug!("no libpython candidate could be preloaded");
        }
    });
}

#[cfg(target_os = "linux")]
fn try_load(name: &str) -> bool {
    use libloading::os::unix::{Library, RTLD_GLOBAL, RTLD_NOW};

    if name.is_empty() {
        return false;
    }
    match unsafe { Library::open(Some(name), RTLD_NOW | RTLD_GLOBAL) } {
        Ok(lib) => {
            log::debug!("preloaded {name}");
            // Stays mapped for the rest of the process; reclaimed at teardown.
            std::mem::forget(lib);
            true
        }
        Err(_) => false,
    }
}
