use super::binding;

/// This function gets called from logger.c with the already-formatted message
#[no_mangle]
extern "C" fn callback_log(
    _component_environment: binding::fmi2ComponentEnvironment,
    instance_name: binding::fmi2String,
    status: binding::fmi2Status,
    category: binding::fmi2String,
    message: binding::fmi2String,
) {
    let instance_name = cstr_or(instance_name, "-");

    let level = match status {
        binding::fmi2Status_fmi2OK => log::Level::Info,
        binding::fmi2Status_fmi2Warning => log::Level::Warn,
        binding::fmi2Status_fmi2Discard => log::Level::Trace,
        binding::fmi2Status_fmi2Error => log::Level::Error,
        binding::fmi2Status_fmi2Fatal => log::Level::Error,
        binding::fmi2Status_fmi2Pending => log::Level::Info,
        _ => log::Level::Error,
    };

    let _category = cstr_or(category, "-");
    let message = cstr_or(message, "-");

    log::logger().log(
        &log::Record::builder()
            .args(format_args!("{}", message))
            .level(level)
            .module_path(Some("logger"))
            .target(instance_name)
            .build(),
    );
}

fn cstr_or<'a>(ptr: binding::fmi2String, fallback: &'a str) -> &'a str {
    if ptr.is_null() {
        return fallback;
    }
    unsafe { std::ffi::CStr::from_ptr(ptr) }
        .to_str()
        .unwrap_or(fallback)
}

#[link(name = "logger", kind = "static")]
extern "C" {
    /// This function is implemented in logger.c
    /// Note: This can be re-implemented in pure Rust once the `c_variadic`
    /// feature stabilizes.
    /// See: https://doc.rust-lang.org/beta/unstable-book/language-features/c-variadic.html
    pub(crate) fn callback_logger_handler(
        componentEnvironment: binding::fmi2ComponentEnvironment,
        instanceName: binding::fmi2String,
        status: binding::fmi2Status,
        category: binding::fmi2String,
        message: binding::fmi2String,
        ...
    );
}
