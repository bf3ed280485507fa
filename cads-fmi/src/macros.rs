/// Declares a struct of eagerly-resolved C function pointers backed by a
/// dynamically loaded library. The field name doubles as the exported symbol
/// name; the `libloading::Library` is kept alive inside the struct so the
/// pointers stay valid for its whole lifetime.
macro_rules! binding_api {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                pub $symbol:ident: $ty:ty,
            )*
        }
    ) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $symbol: $ty,
            )*
            #[allow(dead_code)]
            lib: ::libloading::Library,
        }

        impl $name {
            /// Load the shared library at `path` and resolve every symbol.
            ///
            /// # Safety
            /// `path` must refer to a library exporting the expected C
            /// symbols with the declared signatures.
            pub unsafe fn new(
                path: impl AsRef<::std::ffi::OsStr>,
            ) -> Result<Self, ::libloading::Error> {
                let lib = ::libloading::Library::new(path.as_ref())?;
                $(
                    let $symbol: $ty =
                        *lib.get(concat!(stringify!($symbol), "\0").as_bytes())?;
                )*
                Ok(Self {
                    $($symbol,)*
                    lib,
                })
            }
        }
    };
}

pub(crate) use binding_api;
