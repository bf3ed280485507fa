use super::{binding, Fmi3Status};

/// Callback function for logging. FMI 3.0 dropped the printf-style variadics,
/// so this one lives entirely in Rust.
pub(crate) unsafe extern "C" fn callback_log(
    _instance_environment: binding::fmi3InstanceEnvironment,
    status: binding::fmi3Status,
    category: binding::fmi3String,
    message: binding::fmi3String,
) {
    let status = Fmi3Status::from(status);
    let category = cstr_or(category, "-");
    let message = cstr_or(message, "-");

    let level = match status.0 {
        binding::fmi3Status_fmi3OK => log::Level::Info,
        binding::fmi3Status_fmi3Warning => log::Level::Warn,
        binding::fmi3Status_fmi3Discard => log::Level::Warn,
        binding::fmi3Status_fmi3Error => log::Level::Error,
        binding::fmi3Status_fmi3Fatal => log::Level::Error,
        _ => log::Level::Error,
    };

    log::logger().log(
        &log::Record::builder()
            .args(format_args!("{message}"))
            .level(level)
            .module_path(Some("fmu"))
            .target(category)
            .build(),
    );
}

fn cstr_or<'a>(ptr: binding::fmi3String, fallback: &'a str) -> &'a str {
    if ptr.is_null() {
        return fallback;
    }
    unsafe { std::ffi::CStr::from_ptr(ptr) }
        .to_str()
        .unwrap_or(fallback)
}
