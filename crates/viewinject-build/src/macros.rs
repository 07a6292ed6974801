/// Build-script entry point: generate injectors for the crate being built.
///
/// Expands to statements for a `main` returning
/// `Result<(), Box<dyn std::error::Error>>`. Usage errors fail the build
/// after every diagnostic has been printed.
#[macro_export]
macro_rules! build {
    () => {
        $crate::build!($crate::Builder::new())
    };
    ($builder:expr) => {
        //
        // CARGO
        //

        println!("cargo:rerun-if-changed=build.rs");

        // lets the crate gate `include!`s on generation having run
        println!("cargo:rustc-check-cfg=cfg(viewinject)");
        println!("cargo:rustc-cfg=viewinject");

        //
        // INJECTORS
        //

        let report = $crate::Builder::run($builder)?;
        if report.has_errors() {
            return Err($crate::BuildError::Reported {
                errors: report.errors,
            }
            .into());
        }
    };
}
