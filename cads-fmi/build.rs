fn main() {
    // The FMI 2.0 logger callback is variadic; the printf-style formatting has
    // to happen in C until `c_variadic` stabilizes.
    #[cfg(feature = "fmi2")]
    {
        println!("cargo:rerun-if-changed=src/fmi2/logger.c");
        cc::Build::new().file("src/fmi2/logger.c").compile("logger");
    }
}
