use log::info;

/// Version d'une dépendance suivie par `build.rs` ("Unknown" si absente).
macro_rules! tracked_version {
    ($var:literal) => {
        match option_env!($var) {
            Some(v) if !v.is_empty() => v,
            _ => "Unknown",
        }
    };
}

/// Versions des dépendances principales, telles que vues à la compilation.
pub fn core_dependencies() -> [(&'static str, &'static str); 3] {
    [
        ("rand", tracked_version!("RAND_VERSION")),
        ("glam", tracked_version!("GLAM_VERSION")),
        ("toml", tracked_version!("TOML_VERSION")),
    ]
}

/// Affiche les informations Rust et les dépendances principales de la compilation.
pub fn show_rust_core_dependencies() {
    // Info système (Rust version, OS)
    info!(
        "Rust compiler version: {}",
        rustc_version_runtime::version()
    );
    info!("  Platform    : {}", std::env::consts::OS);
    info!("  Arch        : {}", std::env::consts::ARCH);

    info!("Rust core dependancies");
    for (name, version) in core_dependencies() {
        info!("  {:<4} version: {}", name, version);
    }
}
